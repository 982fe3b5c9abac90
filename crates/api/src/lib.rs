pub mod consts;
pub mod cookies;
pub mod routes;

use crate::{
    cookies::CookieSettings,
    routes::{
        auth::{current_user, logout, oauth_callback, start_login},
        health::health_check,
        pages::{landing_page, login_page, site_content},
    },
};
use axum::{routing::get, Router};
use config::{ApiConfig, ContentConfig, SiteContent};
use services::auth::{AuthError, LoginService, OAuthManager, RedirectWhitelist};
use std::{sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub login: Arc<LoginService>,
    pub cookies: CookieSettings,
    pub content: Option<Arc<SiteContent>>,
    pub app_url: Option<String>,
    pub login_available: bool,
}

/// Service initialization components
pub struct AuthComponents {
    pub oauth_manager: Arc<OAuthManager>,
    pub login_service: Arc<LoginService>,
}

/// Initialize authentication services
pub fn init_auth_services(config: &ApiConfig) -> Result<AuthComponents, AuthError> {
    tracing::info!("Setting up X OAuth provider");
    let oauth_manager = Arc::new(create_oauth_manager(config)?);

    let whitelist = RedirectWhitelist::from_config(&config.redirect);
    tracing::debug!("Redirect whitelist: {:?}", whitelist.origins());

    let login_service = Arc::new(LoginService::new(oauth_manager.clone(), whitelist));

    Ok(AuthComponents {
        oauth_manager,
        login_service,
    })
}

/// Create OAuth manager from configuration
pub fn create_oauth_manager(config: &ApiConfig) -> Result<OAuthManager, AuthError> {
    let manager = OAuthManager::new(
        config.auth.x.clone(),
        Duration::from_secs(config.auth.http_timeout_secs),
    )?;

    if manager.is_configured() {
        tracing::info!("X OAuth configured");
    } else {
        tracing::warn!("X OAuth not configured; login attempts will be redirected with an error");
    }

    Ok(manager)
}

/// Load the landing page content, tolerating a missing or broken file
pub fn load_site_content(config: &ContentConfig) -> Option<SiteContent> {
    match SiteContent::load_from_file(&config.path) {
        Ok(content) => {
            tracing::info!(
                path = %config.path,
                products = content.products.len(),
                "Loaded site content"
            );
            Some(content)
        }
        Err(e) => {
            tracing::warn!(path = %config.path, error = %e, "Site content unavailable");
            None
        }
    }
}

pub fn build_app_state(
    config: &ApiConfig,
    auth_components: &AuthComponents,
    content: Option<SiteContent>,
) -> AppState {
    AppState {
        login: auth_components.login_service.clone(),
        cookies: CookieSettings::from_config(&config.auth),
        content: content.map(Arc::new),
        app_url: config.auth.app_url.clone(),
        login_available: auth_components.oauth_manager.is_configured(),
    }
}

/// Build the complete application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/auth", build_auth_routes())
        .merge(build_page_routes())
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build authentication routes
pub fn build_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/start", get(start_login))
        .route("/callback", get(oauth_callback))
        .route("/logout", get(logout))
        .route("/user", get(current_user))
}

/// Build presentational routes
pub fn build_page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/login", get(login_page))
        .route("/api/content", get(site_content))
}
