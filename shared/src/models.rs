use serde::{Deserialize, Serialize};

use crate::api::UserDataResponse;

/// Per-account branding carried through from the dashboard service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default, rename = "mySite")]
    pub my_site: Option<String>,

    #[serde(default, rename = "myLogo")]
    pub my_logo: Option<String>,
}

/// The merged identity record persisted after a successful login.
///
/// Built from the verify response (email), the role lookup, and the user-data
/// lookup. Serialized wholesale into local storage as the single source of
/// client-side session truth; the JSON key names match what every downstream
/// app already reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub role: String,

    pub user_id: Option<String>,
    pub oauth_id: Option<String>,

    #[serde(rename = "emailVerificationToken")]
    pub email_verification_token: Option<String>,

    pub phone: Option<String>,

    #[serde(rename = "phoneVerifiedAt")]
    pub phone_verified_at: Option<String>,

    pub branding: Branding,
    pub profileimage: Option<String>,
}

impl UserProfile {
    /// Merge the verify-flow responses into the stored profile shape.
    ///
    /// `oauth_id` falls back to `user_id` when the dashboard has no separate
    /// OAuth identity; empty strings count as absent for the optional fields,
    /// while `user_id` itself passes through verbatim.
    pub fn merged(email: String, role: String, data: UserDataResponse) -> Self {
        let oauth_id = non_empty(data.oauth_id).or_else(|| data.user_id.clone());
        Self {
            email,
            role,
            user_id: data.user_id,
            oauth_id,
            email_verification_token: non_empty(data.email_verification_token),
            phone: non_empty(data.phone),
            phone_verified_at: non_empty(data.phone_verified_at),
            branding: data.branding.unwrap_or_default(),
            profileimage: non_empty(data.profileimage),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> UserDataResponse {
        UserDataResponse {
            user_id: Some("usr_81".to_string()),
            oauth_id: None,
            email_verification_token: Some("tok_9".to_string()),
            phone: Some(String::new()),
            phone_verified_at: None,
            branding: None,
            profileimage: Some("https://cdn.example/avatar.png".to_string()),
        }
    }

    #[test]
    fn merged_fills_oauth_id_from_user_id() {
        let profile = UserProfile::merged(
            "u@x.com".to_string(),
            "member".to_string(),
            sample_data(),
        );
        assert_eq!(profile.oauth_id.as_deref(), Some("usr_81"));
        assert_eq!(profile.user_id.as_deref(), Some("usr_81"));
    }

    #[test]
    fn merged_keeps_explicit_oauth_id() {
        let mut data = sample_data();
        data.oauth_id = Some("google|123".to_string());
        let profile = UserProfile::merged("u@x.com".to_string(), "member".to_string(), data);
        assert_eq!(profile.oauth_id.as_deref(), Some("google|123"));
    }

    #[test]
    fn merged_treats_empty_strings_as_absent() {
        let profile = UserProfile::merged(
            "u@x.com".to_string(),
            "member".to_string(),
            sample_data(),
        );
        assert_eq!(profile.phone, None);
        assert_eq!(profile.phone_verified_at, None);
        assert_eq!(profile.branding, Branding::default());
    }

    #[test]
    fn merged_without_user_id_leaves_ids_unset() {
        let data = UserDataResponse::default();
        let profile = UserProfile::merged("u@x.com".to_string(), "admin".to_string(), data);
        assert_eq!(profile.user_id, None);
        assert_eq!(profile.oauth_id, None);
        assert_eq!(profile.email_verification_token, None);
    }

    #[test]
    fn storage_json_uses_historical_key_names() {
        let profile = UserProfile::merged(
            "u@x.com".to_string(),
            "member".to_string(),
            sample_data(),
        );
        let json = serde_json::to_value(&profile).expect("should serialize");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("emailVerificationToken"));
        assert!(object.contains_key("phoneVerifiedAt"));
        assert!(object["branding"].as_object().expect("branding").contains_key("mySite"));
        assert_eq!(object["email"], "u@x.com");
        assert_eq!(object["role"], "member");
    }
}
