use crate::consts::{AUTH_CONTEXT_TTL_SECS, USER_COOKIE, USER_SESSION_TTL_DAYS};
use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use config::AuthConfig;
use percent_encoding::{utf8_percent_encode, CONTROLS};
use services::auth::DEFAULT_REDIRECT;
use time::{Duration, OffsetDateTime};
use tracing::warn;

/// Attributes shared by every cookie the auth routes emit
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub root_domain: String,
}

impl CookieSettings {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            secure: config.secure_cookies,
            root_domain: config.root_domain.clone(),
        }
    }

    /// Short-lived, script-invisible cookie carrying login context
    pub fn auth_context(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(AUTH_CONTEXT_TTL_SECS))
            .build()
    }

    /// Template for removing a path-`/` cookie through the jar
    pub fn removal(name: &'static str) -> Cookie<'static> {
        Cookie::build((name, "")).path("/").build()
    }

    /// The `user` cookie; readable by page scripts
    pub fn user_session(&self, value: String) -> Cookie<'static> {
        Cookie::build((USER_COOKIE, value))
            .path("/")
            .http_only(false)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(USER_SESSION_TTL_DAYS))
            .build()
    }

    /// Already-expired `user` cookie on the registrable domain, clearing it on every subdomain
    pub fn expired_user_session(&self) -> Cookie<'static> {
        Cookie::build((USER_COOKIE, ""))
            .path("/")
            .domain(self.root_domain.clone())
            .http_only(false)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

/// `302 Found` to `location`, or to the site root if it cannot be sent as a header
///
/// Non-ASCII bytes are percent-encoded; control characters are never encoded away.
pub fn found(location: &str) -> Response {
    let value = if location.chars().any(|c| c.is_ascii_control()) {
        None
    } else {
        HeaderValue::from_str(&utf8_percent_encode(location, CONTROLS).to_string()).ok()
    };
    let value = value.unwrap_or_else(|| {
        warn!("Redirect target is not a valid header value, using site root");
        HeaderValue::from_static(DEFAULT_REDIRECT)
    });

    (StatusCode::FOUND, [(LOCATION, value)]).into_response()
}
