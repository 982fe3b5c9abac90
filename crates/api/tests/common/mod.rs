#![allow(dead_code)]

use api::{build_app, build_app_state, init_auth_services, AppState};
use axum::http::{HeaderName, HeaderValue};
use axum_extra::extract::cookie::Cookie;
use axum_test::{TestResponse, TestServer};
use config::{ApiConfig, SiteContent, XOAuthConfig};
use httpmock::MockServer;
use services::auth::{LoginService, MockIdentityProvider, RedirectWhitelist};
use std::sync::Arc;

pub const APP_URL: &str = "http://localhost:3000";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const REDIRECT_URI: &str = "http://localhost:3000/auth/callback";

pub const TOKEN_PATH: &str = "/2/oauth2/token";
pub const USERINFO_PATH: &str = "/2/users/me";

pub const SAMPLE_CONTENT: &str = r#"
header:
  subtitle: "Tools for the curious"
og:
  title: "Twi.am"
  description: "Small apps on one domain"
  image: "https://twi.am/og.png"
  url: "https://twi.am"
  type: "website"
products:
  - name: "MBTI"
    domain: "mbti.twi.am"
    description: "Personality test"
    features: ["Fast", "Free"]
footer:
  links:
    - text: "GitHub"
      url: "https://github.com/twiam"
      type: "link"
"#;

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Helper function to create a test configuration
pub fn test_config() -> ApiConfig {
    let auth = config::AuthConfig {
        x: None,
        app_url: Some(APP_URL.to_string()),
        http_timeout_secs: 2,
        ..Default::default()
    };

    ApiConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        logging: config::LoggingConfig {
            level: "debug".to_string(),
            format: "compact".to_string(),
            modules: std::collections::HashMap::new(),
        },
        redirect: config::RedirectConfig::with_app_url(auth.app_url.as_deref()),
        content: config::ContentConfig {
            path: "does-not-exist.yaml".to_string(),
        },
        auth,
    }
}

/// Test configuration whose X endpoints all point at `provider`
pub fn config_for_provider(provider: &MockServer) -> ApiConfig {
    let mut config = test_config();
    config.auth.x = Some(XOAuthConfig {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        redirect_url: REDIRECT_URI.to_string(),
        auth_url: provider.url("/i/oauth2/authorize"),
        token_url: provider.url(TOKEN_PATH),
        userinfo_url: provider.url(format!("{}?user.fields=profile_image_url", USERINFO_PATH)),
    });
    config
}

pub fn sample_content() -> SiteContent {
    SiteContent::from_yaml(SAMPLE_CONTENT).unwrap()
}

pub fn state_from_config(config: &ApiConfig, content: Option<SiteContent>) -> AppState {
    let auth_components = init_auth_services(config).unwrap();
    build_app_state(config, &auth_components, content)
}

pub fn server_with_state(state: AppState) -> TestServer {
    init_test_tracing();
    TestServer::new(build_app(state)).unwrap()
}

/// Server wired to the real X client, talking to `provider`
pub fn setup_with_provider(provider: &MockServer) -> TestServer {
    let config = config_for_provider(provider);
    server_with_state(state_from_config(&config, Some(sample_content())))
}

/// Server with no X credentials configured
pub fn setup_unconfigured() -> TestServer {
    server_with_state(state_from_config(&test_config(), None))
}

/// Server whose login flow runs against a mocked identity provider
pub fn setup_with_mock(provider: MockIdentityProvider) -> TestServer {
    let config = test_config();
    let mut state = state_from_config(&config, None);
    state.login = Arc::new(LoginService::new(
        Arc::new(provider),
        RedirectWhitelist::from_config(&config.redirect),
    ));
    state.login_available = true;
    server_with_state(state)
}

/// All cookies set by a response, decoded
pub fn set_cookies(response: &TestResponse) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .collect()
}

pub fn find_cookie(response: &TestResponse, name: &str) -> Option<Cookie<'static>> {
    set_cookies(response).into_iter().find(|c| c.name() == name)
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .expect("response has no Location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn cookie_header_name() -> HeaderName {
    HeaderName::from_static("cookie")
}

/// `Cookie` request header carrying the given name/value pairs, percent-encoded
pub fn cookie_header(cookies: &[(&str, &str)]) -> HeaderValue {
    let value = cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("; ");
    HeaderValue::from_str(&value).unwrap()
}

/// Pull a query parameter out of an absolute or relative URL
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = url::Url::parse(url)
        .or_else(|_| url::Url::parse("http://localhost").and_then(|base| base.join(url)))
        .ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
