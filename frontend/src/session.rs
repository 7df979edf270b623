//! Session persistence: the stored profile, the auth cookie, and the
//! per-browser-session verification marker.

use chrono::Duration;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use shared::models::UserProfile;

use crate::storage::{BrowserLocalStorage, BrowserSessionStorage, KeyValueStore};

/// Local-storage key holding the serialized profile.
pub const USER_STORAGE_KEY: &str = "user";

/// Session-storage marker set once a magic link has been verified in this
/// browser session.
pub const SESSION_VERIFIED_KEY: &str = "email_session_verified";

/// Name of the auth cookie shared with the other Beacon apps.
pub const AUTH_COOKIE_NAME: &str = "beacon_token";

/// Apex domain under which the auth cookie is shared across subdomains.
pub const APEX_DOMAIN: &str = "beaconhq.dev";

const AUTH_COOKIE_TTL_DAYS: i64 = 30;

/// Destination for a freshly merged profile.
pub trait SessionStore {
    fn persist(&self, profile: &UserProfile);
}

/// Browser-backed session persistence: local storage + cookie + session
/// marker. Overwrites whatever was there; last write wins.
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn persist(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(json) => BrowserLocalStorage.set(USER_STORAGE_KEY, &json),
            Err(err) => tracing::error!(%err, "failed to serialize user profile"),
        }

        if let Some(token) = profile.email_verification_token.as_deref() {
            set_cookie(&auth_cookie(token, &current_hostname()));
        }

        BrowserSessionStorage.set(SESSION_VERIFIED_KEY, "1");
    }
}

/// Build the auth cookie string for `token` on `hostname`.
///
/// Thirty days, `Secure`, `SameSite=Lax`; scoped to `.{APEX_DOMAIN}` when the
/// host is the apex or one of its subdomains so the session is shared across
/// the Beacon apps, host-scoped everywhere else.
pub fn auth_cookie(token: &str, hostname: &str) -> String {
    let domain = if hostname == APEX_DOMAIN || hostname.ends_with(&format!(".{APEX_DOMAIN}")) {
        format!("; Domain=.{APEX_DOMAIN}")
    } else {
        String::new()
    };
    let max_age = Duration::days(AUTH_COOKIE_TTL_DAYS).num_seconds();
    format!(
        "{AUTH_COOKIE_NAME}={}; Path=/; Max-Age={max_age}; SameSite=Lax; Secure{domain}",
        urlencoding::encode(token)
    )
}

fn current_hostname() -> String {
    web_sys::window()
        .and_then(|window| window.location().hostname().ok())
        .unwrap_or_default()
}

fn set_cookie(cookie: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let document: HtmlDocument = document.unchecked_into();
    if document.set_cookie(cookie).is_err() {
        tracing::warn!("auth cookie write rejected");
    }
}
