//! Configuration builders for tests.

use archief_keys_config::{AppConfig, NavigatorBackend};

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .base_url("http://127.0.0.1:8000")
///     .log_backend()
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.site.base_url = url.to_string();
        self
    }

    pub fn log_backend(mut self) -> Self {
        self.config.navigator.backend = NavigatorBackend::Log;
        self
    }

    pub fn opener(mut self, program: &str, args: &[&str]) -> Self {
        self.config.navigator.backend = NavigatorBackend::Command;
        self.config.navigator.program = program.to_string();
        self.config.navigator.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }

    /// Render the built config as TOML, for tests that go through a file.
    pub fn to_toml(self) -> String {
        toml::to_string_pretty(&self.config).unwrap_or_else(|e| panic!("config to TOML: {e}"))
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
