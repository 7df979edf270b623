use serde::{Deserialize, Serialize};

use crate::models::Branding;

// ============================================================================
// Magic Link API Types
// ============================================================================

/// Body for `POST /login/magic/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMagicLinkRequest {
    pub email: String,

    /// Where the emailed link should land the user after verification.
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

/// Response from `POST /login/magic/send`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMagicLinkResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `GET /login/magic/verify?token=...`.
///
/// A usable response carries `success: true` and the verified email; anything
/// else is treated as a rejected link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyMagicLinkResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Dashboard API Types
// ============================================================================

/// Response from `GET /get-role?email=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleResponse {
    #[serde(default)]
    pub role: Option<String>,
}

/// Response from `GET /userdata?email=...`.
///
/// Every field is optional: the dashboard omits whatever it does not know
/// about an account, and the login screen fills in defaults when merging.
/// Field names mirror the service's JSON verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDataResponse {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub oauth_id: Option<String>,

    #[serde(default, rename = "emailVerificationToken")]
    pub email_verification_token: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default, rename = "phoneVerifiedAt")]
    pub phone_verified_at: Option<String>,

    #[serde(default)]
    pub branding: Option<Branding>,

    #[serde(default)]
    pub profileimage: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_response_tolerates_missing_error() {
        let parsed: SendMagicLinkResponse =
            serde_json::from_str(r#"{"success": true}"#).expect("should parse");
        assert!(parsed.success);
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn verify_response_carries_email_and_error() {
        let parsed: VerifyMagicLinkResponse =
            serde_json::from_str(r#"{"success": false, "error": "Invalid or expired magic link."}"#)
                .expect("should parse");
        assert!(!parsed.success);
        assert_eq!(parsed.email, None);
        assert_eq!(parsed.error.as_deref(), Some("Invalid or expired magic link."));
    }

    #[test]
    fn user_data_parses_sparse_body() {
        let parsed: UserDataResponse =
            serde_json::from_str(r#"{"user_id": "usr_81", "unknown_field": 3}"#)
                .expect("should parse");
        assert_eq!(parsed.user_id.as_deref(), Some("usr_81"));
        assert_eq!(parsed.oauth_id, None);
        assert_eq!(parsed.branding, None);
    }

    #[test]
    fn user_data_parses_wire_field_names() {
        let parsed: UserDataResponse = serde_json::from_str(
            r#"{
                "user_id": "usr_81",
                "emailVerificationToken": "tok_9",
                "phoneVerifiedAt": "2026-01-12T08:00:00Z",
                "branding": {"mySite": "https://studio.example", "myLogo": null}
            }"#,
        )
        .expect("should parse");
        assert_eq!(parsed.email_verification_token.as_deref(), Some("tok_9"));
        assert_eq!(parsed.phone_verified_at.as_deref(), Some("2026-01-12T08:00:00Z"));
        let branding = parsed.branding.expect("branding present");
        assert_eq!(branding.my_site.as_deref(), Some("https://studio.example"));
        assert_eq!(branding.my_logo, None);
    }
}
