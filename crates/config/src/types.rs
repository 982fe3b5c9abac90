use std::{collections::HashMap, env};

/// Authorization endpoint of the X OAuth2 provider
pub const DEFAULT_X_AUTH_URL: &str = "https://twitter.com/i/oauth2/authorize";
/// Token endpoint of the X OAuth2 provider
pub const DEFAULT_X_TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";
/// Profile endpoint; `profile_image_url` is not part of the default field set
pub const DEFAULT_X_USERINFO_URL: &str =
    "https://api.twitter.com/2/users/me?user.fields=profile_image_url";

/// Origins a return URL may point at, in addition to the deployment's app URL
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://twi.am",
    "https://app.twi.am",
    "https://mbti.twi.am",
    "https://doodle.twi.am",
];

pub const DEFAULT_ROOT_DOMAIN: &str = "twi.am";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub redirect: RedirectConfig,
    pub content: ContentConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let auth = AuthConfig::from_env()?;
        let redirect = RedirectConfig::from_env(auth.app_url.as_deref());

        Ok(Self {
            server: ServerConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
            auth,
            redirect,
            content: ContentConfig::from_env(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| "SERVER_PORT must be a valid port number")?,
        })
    }
}

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let mut modules = HashMap::new();

        if let Ok(level) = env::var("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_SERVICES") {
            modules.insert("services".to_string(), level);
        }

        Ok(Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            modules,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut modules = HashMap::new();
        modules.insert("api".to_string(), "debug".to_string());
        modules.insert("services".to_string(), "debug".to_string());

        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules,
        }
    }
}

/// Authentication Configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// X OAuth2 client; `None` when the credentials are not configured
    pub x: Option<XOAuthConfig>,
    /// Public base URL of the application
    pub app_url: Option<String>,
    /// Registrable domain the session cookie is cleared on
    pub root_domain: String,
    /// Whether cookies carry the `Secure` attribute
    pub secure_cookies: bool,
    /// Upper bound for each outbound call to the provider
    pub http_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            x: None,
            app_url: None,
            root_domain: DEFAULT_ROOT_DOMAIN.to_string(),
            secure_cookies: false,
            http_timeout_secs: 10,
        }
    }
}

impl AuthConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_url = env::var("APP_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_APP_URL"))
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let x = if let Some((client_id, client_secret)) = x_credentials(
            env::var("TWITTER_CLIENT_ID").ok(),
            env::var("TWITTER_CLIENT_SECRET").ok(),
        ) {
            let redirect_url = match env::var("TWITTER_REDIRECT_URI") {
                Ok(url) => url,
                Err(_) => app_url
                    .as_ref()
                    .map(|base| format!("{}/auth/callback", base))
                    .ok_or("TWITTER_REDIRECT_URI not set and APP_URL unavailable")?,
            };

            Some(XOAuthConfig {
                client_id,
                client_secret,
                redirect_url,
                auth_url: env::var("TWITTER_AUTH_URL")
                    .unwrap_or_else(|_| DEFAULT_X_AUTH_URL.to_string()),
                token_url: env::var("TWITTER_TOKEN_URL")
                    .unwrap_or_else(|_| DEFAULT_X_TOKEN_URL.to_string()),
                userinfo_url: env::var("TWITTER_USERINFO_URL")
                    .unwrap_or_else(|_| DEFAULT_X_USERINFO_URL.to_string()),
            })
        } else {
            None
        };

        let deployment = env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_default();

        Ok(Self {
            x,
            app_url,
            root_domain: env::var("ROOT_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_ROOT_DOMAIN.to_string()),
            secure_cookies: is_production(&deployment),
            http_timeout_secs: env::var("OAUTH_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| "OAUTH_HTTP_TIMEOUT_SECS must be a valid number")?,
        })
    }
}

/// Both credentials must be present and non-empty for the client to count as configured
fn x_credentials(
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Option<(String, String)> {
    let client_id = client_id.filter(|v| !v.trim().is_empty())?;
    let client_secret = client_secret.filter(|v| !v.trim().is_empty())?;
    Some((client_id, client_secret))
}

fn is_production(deployment: &str) -> bool {
    deployment.eq_ignore_ascii_case("production")
}

#[derive(Debug, Clone)]
pub struct XOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl XOAuthConfig {
    /// Provider config against the public X endpoints
    pub fn new(client_id: &str, client_secret: &str, redirect_url: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_url: redirect_url.to_string(),
            auth_url: DEFAULT_X_AUTH_URL.to_string(),
            token_url: DEFAULT_X_TOKEN_URL.to_string(),
            userinfo_url: DEFAULT_X_USERINFO_URL.to_string(),
        }
    }
}

/// Return-URL allow list
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    pub allowed_origins: Vec<String>,
}

impl RedirectConfig {
    /// Built-in origins followed by `app_url`
    pub fn with_app_url(app_url: Option<&str>) -> Self {
        Self::from_origins(
            DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            app_url,
        )
    }

    /// Load from environment variables
    ///
    /// `REDIRECT_ALLOWED_ORIGINS` (comma separated) replaces the built-in list.
    /// The app URL is always appended.
    pub fn from_env(app_url: Option<&str>) -> Self {
        match env::var("REDIRECT_ALLOWED_ORIGINS") {
            Ok(origins) => Self::from_origins(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                app_url,
            ),
            Err(_) => Self::with_app_url(app_url),
        }
    }

    fn from_origins(mut allowed_origins: Vec<String>, app_url: Option<&str>) -> Self {
        if let Some(url) = app_url.filter(|url| !url.is_empty()) {
            if !allowed_origins.iter().any(|o| o == url) {
                allowed_origins.push(url.to_string());
            }
        }
        Self { allowed_origins }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self::with_app_url(None)
    }
}

#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub path: String,
}

impl ContentConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            path: env::var("CONTENT_PATH").unwrap_or_else(|_| "config/content.yaml".to_string()),
        }
    }
}
