use super::ports::{AuthError, AuthErrorKind, IdentityProvider};
use super::redirect::RedirectWhitelist;
use super::session::UserSession;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Request context kept in the browser between `/auth/start` and `/auth/callback`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthContext {
    pub state: String,
    pub return_url: String,
    pub pkce_verifier: String,
}

/// Result of initiating a login
#[derive(Debug, Clone)]
pub struct LoginStart {
    pub authorize_url: String,
    pub context: PendingAuthContext,
}

/// Query parameters echoed back by the provider
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Context read back from the browser's cookies; every field may be missing or forged
#[derive(Debug, Clone, Default)]
pub struct StoredAuthContext {
    pub state: Option<String>,
    pub return_url: Option<String>,
    pub pkce_verifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Authenticated {
        session: UserSession,
        return_url: String,
    },
    Failed {
        kind: AuthErrorKind,
        return_url: String,
    },
}

impl CallbackOutcome {
    /// Location the browser is sent to
    pub fn redirect_url(&self) -> String {
        match self {
            CallbackOutcome::Authenticated { return_url, .. } => return_url.clone(),
            CallbackOutcome::Failed { kind, return_url } => kind.redirect_url(return_url),
        }
    }
}

/// Login flow against a single identity provider
pub struct LoginService {
    provider: Arc<dyn IdentityProvider>,
    whitelist: RedirectWhitelist,
}

impl LoginService {
    pub fn new(provider: Arc<dyn IdentityProvider>, whitelist: RedirectWhitelist) -> Self {
        Self {
            provider,
            whitelist,
        }
    }

    pub fn whitelist(&self) -> &RedirectWhitelist {
        &self.whitelist
    }

    /// Build the provider redirect and the context the browser has to keep
    pub fn start(&self, return_url: Option<&str>) -> Result<LoginStart, AuthError> {
        let return_url = self.whitelist.sanitize(return_url);
        let request = self.provider.authorization_request()?;

        debug!("Starting login, returning to {}", return_url);

        Ok(LoginStart {
            authorize_url: request.url,
            context: PendingAuthContext {
                state: request.state,
                return_url,
                pkce_verifier: request.pkce_verifier,
            },
        })
    }

    /// Finish the login started by [`LoginService::start`]
    pub async fn complete(
        &self,
        params: CallbackParams,
        stored: StoredAuthContext,
    ) -> CallbackOutcome {
        // The cookie may have been tampered with, so it goes through the whitelist again
        let return_url = self.whitelist.sanitize(stored.return_url.as_deref());

        match self.authenticate(params, stored).await {
            Ok(session) => {
                debug!("Login completed for user {}", session.id);
                CallbackOutcome::Authenticated {
                    session,
                    return_url,
                }
            }
            Err(e) => {
                let kind = e.kind();
                match kind {
                    AuthErrorKind::InvalidState => warn!("Rejected OAuth callback: {}", e),
                    _ => error!("OAuth callback failed: {}", e),
                }
                CallbackOutcome::Failed { kind, return_url }
            }
        }
    }

    async fn authenticate(
        &self,
        params: CallbackParams,
        stored: StoredAuthContext,
    ) -> Result<UserSession, AuthError> {
        let (code, pkce_verifier) = verify_state(params, stored)?;

        let access_token = self.provider.exchange_code(code, pkce_verifier).await?;
        let profile = self.provider.fetch_profile(access_token).await?;

        Ok(UserSession::from(profile))
    }
}

/// Single comparison of the echoed state against the stored one
fn verify_state(
    params: CallbackParams,
    stored: StoredAuthContext,
) -> Result<(String, String), AuthError> {
    let (Some(code), Some(state)) = (params.code, params.state) else {
        return Err(AuthError::InvalidState);
    };
    if code.is_empty() || state.is_empty() {
        return Err(AuthError::InvalidState);
    }

    match stored.state {
        Some(stored_state) if stored_state == state => {}
        _ => return Err(AuthError::InvalidState),
    }

    // A verifier can only be missing if the cookies were partially dropped
    let pkce_verifier = stored
        .pkce_verifier
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidState)?;

    Ok((code, pkce_verifier))
}
