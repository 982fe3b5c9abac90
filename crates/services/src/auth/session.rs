use super::ports::{AuthError, ProviderProfile};
use serde::{Deserialize, Serialize};

/// Client-visible login record stored in the `user` cookie
///
/// The record is neither signed nor checked again after issuance; it only
/// reflects what the provider reported at login time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(
        rename = "profileImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image: Option<String>,
}

impl UserSession {
    pub fn to_cookie_value(&self) -> Result<String, AuthError> {
        serde_json::to_string(self)
            .map_err(|e| AuthError::InternalError(format!("Failed to encode session: {}", e)))
    }

    pub fn from_cookie_value(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok()
    }
}

impl From<ProviderProfile> for UserSession {
    fn from(profile: ProviderProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            username: profile.username,
            profile_image: profile.profile_image_url,
        }
    }
}
