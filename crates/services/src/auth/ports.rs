use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Query parameter carrying the failure marker back to the browser
pub const AUTH_ERROR_PARAM: &str = "authError";

/// Everything the browser must carry from `/auth/start` to `/auth/callback`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub pkce_verifier: String,
}

/// Identity as reported by the provider's profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("OAuth provider not configured")]
    NotConfigured,

    #[error("Invalid state parameter")]
    InvalidState,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("User info request failed: {0}")]
    UserInfo(String),

    #[error("Invalid user profile: {0}")]
    InvalidProfile(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Marker reported to the browser for this failure
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidState => AuthErrorKind::InvalidState,
            AuthError::TokenExchange(_) => AuthErrorKind::TokenError,
            AuthError::UserInfo(_) => AuthErrorKind::UserInfoError,
            AuthError::ConfigError(_)
            | AuthError::NotConfigured
            | AuthError::InvalidProfile(_)
            | AuthError::InternalError(_) => AuthErrorKind::Generic,
        }
    }
}

/// Login failure outcomes as seen by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidState,
    TokenError,
    UserInfoError,
    Generic,
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorKind::InvalidState => "invalid_state",
            AuthErrorKind::TokenError => "token_error",
            AuthErrorKind::UserInfoError => "user_info_error",
            AuthErrorKind::Generic => "true",
        }
    }

    /// Where the browser is sent after this failure
    ///
    /// Generic failures always land on the site root; the others keep the
    /// (already sanitized) return URL.
    pub fn redirect_url(&self, safe_return_url: &str) -> String {
        let base = match self {
            AuthErrorKind::Generic => "/",
            _ => safe_return_url,
        };
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", base, separator, AUTH_ERROR_PARAM, self.as_str())
    }
}

impl std::fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external identity provider (X) as used by the login flow
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Build the authorization URL with a fresh state token and PKCE pair
    fn authorization_request(&self) -> Result<AuthorizationRequest, AuthError>;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: String, pkce_verifier: String)
        -> Result<String, AuthError>;

    /// Fetch the profile of the token's owner
    async fn fetch_profile(&self, access_token: String) -> Result<ProviderProfile, AuthError>;
}
