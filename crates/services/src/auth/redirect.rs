use config::RedirectConfig;
use tracing::debug;
use url::Url;

/// Fallback target whenever a return URL is rejected
pub const DEFAULT_REDIRECT: &str = "/";

/// Allow list for caller-supplied return URLs
#[derive(Debug, Clone)]
pub struct RedirectWhitelist {
    origins: Vec<String>,
}

impl RedirectWhitelist {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: origins
                .into_iter()
                .map(Into::into)
                .filter(|origin: &String| !origin.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &RedirectConfig) -> Self {
        Self::new(config.allowed_origins.iter().cloned())
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// True if `url` is an absolute URL starting with an allowed origin
    pub fn is_allowed(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        // The URL parser silently strips tabs and newlines, so the raw string
        // has to be checked before it ends up in a Location header.
        if url.chars().any(|c| c.is_ascii_control()) {
            debug!("Rejecting return URL containing control characters");
            return false;
        }

        if let Err(e) = Url::parse(url) {
            debug!("Rejecting malformed return URL: {}", e);
            return false;
        }

        self.origins
            .iter()
            .any(|origin| url.starts_with(origin.as_str()))
    }

    /// `url` itself when allowed, otherwise the site root
    pub fn sanitize(&self, url: Option<&str>) -> String {
        match url {
            Some(url) if !url.is_empty() && self.is_allowed(url) => url.to_string(),
            _ => DEFAULT_REDIRECT.to_string(),
        }
    }
}
