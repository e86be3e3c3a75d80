#![deny(unsafe_code)]

//! Configuration loading and validation for archief-keys.
//!
//! Loads a TOML file into [`AppConfig`]. The configuration covers where the
//! site lives, how navigations are carried out, and logging. The shortcut
//! table itself is fixed and not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "archief-keys.toml";

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The site the shortcuts navigate on.
    #[serde(default)]
    pub site: SiteConfig,

    /// How navigations are carried out.
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL every shortcut path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Navigation backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorBackend {
    /// Open the URL with an external program.
    Command,
    /// Only log the URL.
    Log,
}

/// Navigator configuration.
///
/// ## TOML Example
///
/// ```toml
/// [navigator]
/// backend = "command"
/// program = "firefox"
/// args = ["--new-tab"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    #[serde(default = "default_backend")]
    pub backend: NavigatorBackend,

    /// Opener program, used when `backend = "command"`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the URL.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            program: default_program(),
            args: Vec::new(),
        }
    }
}

fn default_backend() -> NavigatorBackend {
    NavigatorBackend::Command
}

fn default_program() -> String {
    "xdg-open".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.site.base_url.as_str();
        if base.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".to_string(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start with http:// or https://, got {base:?}"
            )));
        }

        if self.navigator.backend == NavigatorBackend::Command
            && self.navigator.program.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "navigator.program must not be empty when backend is \"command\"".to_string(),
            ));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                VALID_LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}
