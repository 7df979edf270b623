//! The login flow: state machine, typed failures, and the verify pipeline.
//!
//! UI state lives in an immutable [`LoginState`] advanced by a single
//! [`LoginState::apply`] per event. Network steps are fallible stages that
//! short-circuit on the first failure; the remote responses are interpreted by
//! pure functions so the whole flow is testable without a browser.

use std::rc::Rc;

use yew::prelude::Reducible;

use shared::api::{RoleResponse, SendMagicLinkResponse, UserDataResponse, VerifyMagicLinkResponse};
use shared::models::UserProfile;

use crate::i18n::{translate, Language};
use crate::session::SessionStore;

/// Where a successful login lands when the page was opened without a
/// `redirect` parameter.
pub const DEFAULT_REDIRECT_URL: &str = "https://chat.beaconhq.dev";

/// A failure surfaced to the user. Server-supplied messages are shown
/// verbatim; the rest localize or describe the failing step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The service returned its own error message.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to send magic link")]
    SendFailed,

    #[error("magic link verification failed")]
    VerifyFailed,

    #[error("User role unavailable (status: {0})")]
    RoleUnavailable(u16),

    #[error("Unable to retrieve user role.")]
    RoleMissing,

    #[error("Unable to fetch user data (status: {0})")]
    UserDataUnavailable(u16),
}

impl FlowError {
    /// The inline message shown for this failure.
    pub fn user_message(&self, language: Language) -> String {
        match self {
            FlowError::Rejected(message) => message.clone(),
            FlowError::SendFailed => translate(language, "login.errorSend"),
            FlowError::VerifyFailed => translate(language, "login.errorVerify"),
            other => other.to_string(),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn server_message(error: Option<String>) -> Option<FlowError> {
    error.filter(|m| !m.is_empty()).map(FlowError::Rejected)
}

/// Interpret the magic-link send response.
pub fn interpret_send(status: u16, body: Option<SendMagicLinkResponse>) -> Result<(), FlowError> {
    let Some(body) = body else {
        return Err(FlowError::SendFailed);
    };
    if is_success(status) && body.success {
        return Ok(());
    }
    Err(server_message(body.error).unwrap_or(FlowError::SendFailed))
}

/// Interpret the verify response; a usable one yields the confirmed email.
pub fn interpret_verify(
    status: u16,
    body: Option<VerifyMagicLinkResponse>,
) -> Result<String, FlowError> {
    let Some(body) = body else {
        return Err(FlowError::VerifyFailed);
    };
    if is_success(status) && body.success {
        if let Some(email) = body.email.filter(|e| !e.is_empty()) {
            return Ok(email);
        }
    }
    Err(server_message(body.error).unwrap_or(FlowError::VerifyFailed))
}

/// Interpret the role lookup; the account must have a role to log in.
pub fn interpret_role(status: u16, body: Option<RoleResponse>) -> Result<String, FlowError> {
    if !is_success(status) {
        return Err(FlowError::RoleUnavailable(status));
    }
    body.and_then(|b| b.role)
        .filter(|role| !role.is_empty())
        .ok_or(FlowError::RoleMissing)
}

/// Interpret the user-data lookup.
pub fn interpret_user_data(
    status: u16,
    body: Option<UserDataResponse>,
) -> Result<UserDataResponse, FlowError> {
    if !is_success(status) {
        return Err(FlowError::UserDataUnavailable(status));
    }
    body.ok_or(FlowError::VerifyFailed)
}

/// The four remote operations behind the login screen.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn send_magic_link(&self, email: &str, redirect_url: &str) -> Result<(), FlowError>;
    async fn verify_token(&self, token: &str) -> Result<String, FlowError>;
    async fn fetch_role(&self, email: &str) -> Result<String, FlowError>;
    async fn fetch_user_data(&self, email: &str) -> Result<UserDataResponse, FlowError>;
}

/// Run the verify pipeline: verify the token, look up role and user data,
/// merge, persist. Each stage awaits the prior one and the first failure
/// aborts the chain before anything is persisted.
pub async fn verify_magic_token<G, S>(
    gateway: &G,
    session: &S,
    token: &str,
) -> Result<UserProfile, FlowError>
where
    G: AuthGateway,
    S: SessionStore,
{
    let email = gateway.verify_token(token).await?;
    let role = gateway.fetch_role(&email).await?;
    let data = gateway.fetch_user_data(&email).await?;

    let profile = UserProfile::merged(email, role, data);
    session.persist(&profile);
    Ok(profile)
}

/// Resolve the post-login destination from the `redirect` query parameter.
pub fn resolve_redirect(param: Option<String>) -> String {
    param
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_string())
}

/// The URL the emailed link should come back to: this page, carrying the
/// resolved destination along.
pub fn send_redirect_url(origin: &str, target: &str) -> String {
    format!("{origin}?redirect={}", urlencoding::encode(target))
}

// ============================================================================
// UI state machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
    Verifying,
}

/// Non-error status line shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LinkSent,
    VerifyingLink,
}

impl Notice {
    pub fn text(self, language: Language) -> String {
        let key = match self {
            Notice::LinkSent => "login.sentStatus",
            Notice::VerifyingLink => "login.verifyStatus",
        };
        translate(language, key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginState {
    pub language: Language,
    pub email: String,
    pub phase: Phase,
    pub notice: Option<Notice>,
    pub error: Option<FlowError>,
}

#[derive(Debug, Clone)]
pub enum LoginAction {
    SetLanguage(Language),
    SetEmail(String),
    SendStarted,
    SendSucceeded,
    SendFailed(FlowError),
    VerifyStarted,
    VerifyFailed(FlowError),
}

impl LoginState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            email: String::new(),
            phase: Phase::Idle,
            notice: None,
            error: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Advance the state by one event. A successful verification never comes
    /// back through here: it navigates away from the page instead.
    pub fn apply(&self, action: LoginAction) -> LoginState {
        let mut next = self.clone();
        match action {
            LoginAction::SetLanguage(language) => next.language = language,
            LoginAction::SetEmail(email) => next.email = email,
            LoginAction::SendStarted => {
                next.phase = Phase::Sending;
                next.notice = None;
                next.error = None;
            }
            LoginAction::SendSucceeded => {
                next.phase = Phase::Idle;
                next.notice = Some(Notice::LinkSent);
            }
            LoginAction::SendFailed(error) => {
                next.phase = Phase::Idle;
                next.error = Some(error);
            }
            LoginAction::VerifyStarted => {
                next.phase = Phase::Verifying;
                next.notice = Some(Notice::VerifyingLink);
                next.error = None;
            }
            LoginAction::VerifyFailed(error) => {
                next.phase = Phase::Idle;
                next.notice = None;
                next.error = Some(error);
            }
        }
        next
    }
}

impl Reducible for LoginState {
    type Action = LoginAction;

    fn reduce(self: Rc<Self>, action: LoginAction) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn interpret_send_accepts_success() {
        let body = SendMagicLinkResponse { success: true, error: None };
        assert_eq!(interpret_send(200, Some(body)), Ok(()));
    }

    #[test]
    fn interpret_send_surfaces_server_message() {
        let body = SendMagicLinkResponse {
            success: false,
            error: Some("Rate limited".to_string()),
        };
        let err = interpret_send(200, Some(body)).expect_err("should fail");
        assert_eq!(err.user_message(Language::En), "Rate limited");
    }

    #[test]
    fn interpret_send_falls_back_to_localized_message() {
        let body = SendMagicLinkResponse { success: false, error: None };
        assert_eq!(interpret_send(500, Some(body)), Err(FlowError::SendFailed));
        assert_eq!(interpret_send(200, None), Err(FlowError::SendFailed));
        assert_eq!(
            FlowError::SendFailed.user_message(Language::En),
            "Failed to send magic link."
        );
        assert_eq!(
            FlowError::SendFailed.user_message(Language::No),
            "Kunne ikke sende magisk lenke."
        );
    }

    #[test]
    fn interpret_verify_requires_success_and_email() {
        let ok = VerifyMagicLinkResponse {
            success: true,
            email: Some("u@x.com".to_string()),
            error: None,
        };
        assert_eq!(interpret_verify(200, Some(ok)).as_deref(), Ok("u@x.com"));

        let missing_email = VerifyMagicLinkResponse { success: true, email: None, error: None };
        assert_eq!(interpret_verify(200, Some(missing_email)), Err(FlowError::VerifyFailed));

        let rejected = VerifyMagicLinkResponse {
            success: false,
            email: None,
            error: Some("Invalid or expired magic link.".to_string()),
        };
        assert_eq!(
            interpret_verify(401, Some(rejected)),
            Err(FlowError::Rejected("Invalid or expired magic link.".to_string()))
        );
    }

    #[test]
    fn interpret_role_reports_status_and_missing_role() {
        let err = interpret_role(503, None).expect_err("should fail");
        assert_eq!(err.user_message(Language::En), "User role unavailable (status: 503)");

        let empty = RoleResponse { role: None };
        assert_eq!(interpret_role(200, Some(empty)), Err(FlowError::RoleMissing));

        let member = RoleResponse { role: Some("member".to_string()) };
        assert_eq!(interpret_role(200, Some(member)).as_deref(), Ok("member"));
    }

    #[test]
    fn interpret_user_data_reports_status() {
        let err = interpret_user_data(404, None).expect_err("should fail");
        assert_eq!(err.user_message(Language::En), "Unable to fetch user data (status: 404)");
        assert!(interpret_user_data(200, Some(UserDataResponse::default())).is_ok());
    }

    #[test]
    fn redirect_defaults_and_overrides() {
        assert_eq!(resolve_redirect(None), DEFAULT_REDIRECT_URL);
        assert_eq!(resolve_redirect(Some(String::new())), DEFAULT_REDIRECT_URL);
        assert_eq!(
            resolve_redirect(Some("https://studio.beaconhq.dev".to_string())),
            "https://studio.beaconhq.dev"
        );
    }

    #[test]
    fn send_redirect_url_encodes_target() {
        assert_eq!(
            send_redirect_url("https://login.beaconhq.dev", "https://chat.beaconhq.dev/?tab=1"),
            "https://login.beaconhq.dev?redirect=https%3A%2F%2Fchat.beaconhq.dev%2F%3Ftab%3D1"
        );
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    #[test]
    fn send_success_ends_idle_with_status_and_no_error() {
        let state = LoginState::new(Language::En)
            .apply(LoginAction::SetEmail("u@x.com".to_string()))
            .apply(LoginAction::SendStarted);
        assert_eq!(state.phase, Phase::Sending);
        assert!(state.loading());

        let state = state.apply(LoginAction::SendSucceeded);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.loading());
        assert_eq!(state.error, None);
        let notice = state.notice.expect("status message shown");
        assert!(!notice.text(state.language).is_empty());
    }

    #[test]
    fn send_failure_shows_server_message_verbatim() {
        let state = LoginState::new(Language::En)
            .apply(LoginAction::SendStarted)
            .apply(LoginAction::SendFailed(FlowError::Rejected("Rate limited".to_string())));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.notice, None);
        let error = state.error.expect("error shown");
        assert_eq!(error.user_message(state.language), "Rate limited");
    }

    #[test]
    fn send_started_clears_previous_outcome() {
        let state = LoginState::new(Language::En)
            .apply(LoginAction::SendStarted)
            .apply(LoginAction::SendFailed(FlowError::SendFailed))
            .apply(LoginAction::SendStarted);
        assert_eq!(state.error, None);
        assert_eq!(state.notice, None);
        assert_eq!(state.phase, Phase::Sending);
    }

    #[test]
    fn verify_failure_returns_to_idle_with_error() {
        let state = LoginState::new(Language::En)
            .apply(LoginAction::VerifyStarted);
        assert_eq!(state.phase, Phase::Verifying);
        assert_eq!(state.notice, Some(Notice::VerifyingLink));

        let state = state.apply(LoginAction::VerifyFailed(FlowError::RoleMissing));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.notice, None);
        assert_eq!(state.error, Some(FlowError::RoleMissing));
    }

    // ------------------------------------------------------------------
    // Verify pipeline
    // ------------------------------------------------------------------

    struct FakeGateway {
        verify: Result<String, FlowError>,
        role: Result<String, FlowError>,
        data: Result<UserDataResponse, FlowError>,
    }

    impl FakeGateway {
        fn happy() -> Self {
            Self {
                verify: Ok("u@x.com".to_string()),
                role: Ok("member".to_string()),
                data: Ok(UserDataResponse {
                    user_id: Some("usr_81".to_string()),
                    ..UserDataResponse::default()
                }),
            }
        }
    }

    impl AuthGateway for FakeGateway {
        async fn send_magic_link(&self, _email: &str, _redirect_url: &str) -> Result<(), FlowError> {
            Ok(())
        }

        async fn verify_token(&self, _token: &str) -> Result<String, FlowError> {
            self.verify.clone()
        }

        async fn fetch_role(&self, _email: &str) -> Result<String, FlowError> {
            self.role.clone()
        }

        async fn fetch_user_data(&self, _email: &str) -> Result<UserDataResponse, FlowError> {
            self.data.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSession {
        persisted: RefCell<Vec<UserProfile>>,
    }

    impl SessionStore for RecordingSession {
        fn persist(&self, profile: &UserProfile) {
            self.persisted.borrow_mut().push(profile.clone());
        }
    }

    #[test]
    fn verify_pipeline_persists_merged_profile_once() {
        let session = RecordingSession::default();
        let profile = block_on(verify_magic_token(&FakeGateway::happy(), &session, "abc123"))
            .expect("pipeline should succeed");

        assert_eq!(profile.email, "u@x.com");
        assert_eq!(profile.role, "member");

        let persisted = session.persisted.borrow();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0], profile);
        assert_eq!(persisted[0].oauth_id.as_deref(), Some("usr_81"));
    }

    #[test]
    fn verify_pipeline_aborts_before_persisting_on_role_failure() {
        let mut gateway = FakeGateway::happy();
        gateway.role = Err(FlowError::RoleUnavailable(503));

        let session = RecordingSession::default();
        let err = block_on(verify_magic_token(&gateway, &session, "abc123"))
            .expect_err("pipeline should fail");

        assert_eq!(err, FlowError::RoleUnavailable(503));
        assert!(session.persisted.borrow().is_empty());
    }

    #[test]
    fn verify_pipeline_surfaces_rejected_link() {
        let mut gateway = FakeGateway::happy();
        gateway.verify = Err(FlowError::Rejected("Invalid or expired magic link.".to_string()));

        let session = RecordingSession::default();
        let err = block_on(verify_magic_token(&gateway, &session, "stale"))
            .expect_err("pipeline should fail");

        assert_eq!(err.user_message(Language::En), "Invalid or expired magic link.");
        assert!(session.persisted.borrow().is_empty());
    }
}
