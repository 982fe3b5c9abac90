/// Anti-forgery state minted by `/auth/start`
pub const AUTH_STATE_COOKIE: &str = "auth_state";

/// Sanitized return URL minted by `/auth/start`
pub const AUTH_RETURN_URL_COOKIE: &str = "auth_return_url";

/// PKCE code verifier minted by `/auth/start`
pub const AUTH_PKCE_VERIFIER_COOKIE: &str = "auth_pkce_verifier";

/// Client-readable session record
pub const USER_COOKIE: &str = "user";

/// Lifetime of the transient login cookies (10 minutes)
pub const AUTH_CONTEXT_TTL_SECS: i64 = 60 * 10;

/// Lifetime of the `user` cookie
pub const USER_SESSION_TTL_DAYS: i64 = 30;
