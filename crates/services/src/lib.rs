pub mod auth;

pub use auth::{LoginService, OAuthManager, RedirectWhitelist, UserSession};
