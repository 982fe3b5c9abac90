// Configuration Management
//
// This crate handles all configuration loading for twiam-auth:
// - Environment-driven service configuration (server, logging, auth, redirects)
// - The YAML content file consumed by the landing page
//
// This keeps configuration concerns separate from the auth flow itself.

use std::path::Path;
use thiserror::Error;

pub mod content;
pub mod types;

// Re-export all configuration types
pub use content::*;
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },
}

impl SiteContent {
    /// Load site content from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
