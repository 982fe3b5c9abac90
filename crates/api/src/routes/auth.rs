use super::query_or_default;
use crate::{
    consts::{AUTH_PKCE_VERIFIER_COOKIE, AUTH_RETURN_URL_COOKIE, AUTH_STATE_COOKIE, USER_COOKIE},
    cookies::{found, CookieSettings},
    AppState,
};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use services::auth::{
    AuthErrorKind, CallbackOutcome, CallbackParams, StoredAuthContext, UserSession,
    DEFAULT_REDIRECT,
};
use tracing::{debug, error};

#[derive(Debug, Default, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallback {
    code: Option<String>,
    state: Option<String>,
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name).map(|cookie| cookie.value().to_string())
}

fn clear_auth_context(jar: CookieJar) -> CookieJar {
    jar.remove(CookieSettings::removal(AUTH_STATE_COOKIE))
        .remove(CookieSettings::removal(AUTH_RETURN_URL_COOKIE))
        .remove(CookieSettings::removal(AUTH_PKCE_VERIFIER_COOKIE))
}

/// Initiate X OAuth flow - redirects to X
///
/// GET /auth/start?returnUrl=...
pub async fn start_login(State(app): State<AppState>, uri: Uri, jar: CookieJar) -> Response {
    let query: ReturnUrlQuery = query_or_default(&uri);
    debug!("Initiating X OAuth flow");

    let start = match app.login.start(query.return_url.as_deref()) {
        Ok(start) => start,
        Err(e) => {
            error!("Failed to generate X auth URL: {}", e);
            return found(&AuthErrorKind::Generic.redirect_url(DEFAULT_REDIRECT));
        }
    };

    let context = start.context;
    let jar = jar
        .add(app.cookies.auth_context(AUTH_STATE_COOKIE, context.state))
        .add(
            app.cookies
                .auth_context(AUTH_RETURN_URL_COOKIE, context.return_url),
        )
        .add(
            app.cookies
                .auth_context(AUTH_PKCE_VERIFIER_COOKIE, context.pkce_verifier),
        );

    (jar, found(&start.authorize_url)).into_response()
}

/// Handle the provider's redirect back
///
/// GET /auth/callback?code=...&state=...
///
/// Every outcome is a redirect; the transient cookies are consumed either way.
pub async fn oauth_callback(State(app): State<AppState>, uri: Uri, jar: CookieJar) -> Response {
    let query: OAuthCallback = query_or_default(&uri);

    let stored = StoredAuthContext {
        state: cookie_value(&jar, AUTH_STATE_COOKIE),
        return_url: cookie_value(&jar, AUTH_RETURN_URL_COOKIE),
        pkce_verifier: cookie_value(&jar, AUTH_PKCE_VERIFIER_COOKIE),
    };
    let params = CallbackParams {
        code: query.code,
        state: query.state,
    };

    let outcome = app.login.complete(params, stored).await;
    let jar = clear_auth_context(jar);

    match outcome {
        CallbackOutcome::Authenticated {
            session,
            return_url,
        } => match session.to_cookie_value() {
            Ok(value) => {
                let jar = jar.add(app.cookies.user_session(value));
                (jar, found(&return_url)).into_response()
            }
            Err(e) => {
                error!("X callback error: {}", e);
                (
                    jar,
                    found(&AuthErrorKind::Generic.redirect_url(DEFAULT_REDIRECT)),
                )
                    .into_response()
            }
        },
        failed @ CallbackOutcome::Failed { .. } => {
            (jar, found(&failed.redirect_url())).into_response()
        }
    }
}

/// Logout endpoint
///
/// GET /auth/logout?returnUrl=...
pub async fn logout(State(app): State<AppState>, uri: Uri, jar: CookieJar) -> Response {
    let query: ReturnUrlQuery = query_or_default(&uri);
    let return_url = app.login.whitelist().sanitize(query.return_url.as_deref());

    debug!("Logging out, returning to {}", return_url);

    let jar = jar.add(app.cookies.expired_user_session());
    (jar, found(&return_url)).into_response()
}

/// Get current user information from the `user` cookie
pub async fn current_user(jar: CookieJar) -> Response {
    match jar
        .get(USER_COOKIE)
        .and_then(|cookie| UserSession::from_cookie_value(cookie.value()))
    {
        Some(session) => Json(session).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "unauthorized",
                "error_description": "No active session"
            })),
        )
            .into_response(),
    }
}
