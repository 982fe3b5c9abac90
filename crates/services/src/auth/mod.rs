pub mod login_service;
pub mod oauth;
pub mod ports;
pub mod redirect;
pub mod session;

pub use login_service::{
    CallbackOutcome, CallbackParams, LoginService, LoginStart, PendingAuthContext,
    StoredAuthContext,
};
pub use oauth::OAuthManager;
pub use ports::*;
pub use redirect::{RedirectWhitelist, DEFAULT_REDIRECT};
pub use session::UserSession;
