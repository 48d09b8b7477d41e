//! Application configuration.
//!
//! Credentials and endpoints are carried in explicit structs passed to the
//! client constructors; nothing reads the environment after startup.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub ontology: OntologyConfig,
    pub backend: BackendConfig,
    pub translator: TranslatorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables (`METRIQ__` prefix,
    /// e.g. `METRIQ__BACKEND__API_KEY`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_env("METRIQ")
    }

    /// Load configuration from environment with custom prefix
    pub fn load_from_env(prefix: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("ontology.path", "ontology.yaml")?
            .set_default("backend.base_url", "https://api.datadoghq.com")?
            .set_default("backend.api_key", "")?
            .set_default("backend.app_key", "")?
            .set_default("backend.timeout_secs", 10)?
            .set_default("translator.base_url", "https://api.openai.com")?
            .set_default("translator.api_key", "")?
            .set_default("translator.model", "gpt-4.1")?
            .set_default("translator.temperature", 0.2)?
            .set_default("translator.timeout_secs", 30)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from file with environment overrides
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("METRIQ").separator("__"));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// Ontology source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OntologyConfig {
    #[serde(default = "default_ontology_path")]
    pub path: String,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            path: default_ontology_path(),
        }
    }
}

fn default_ontology_path() -> String {
    "ontology.yaml".to_string()
}

/// Time-series backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub app_key: String,
    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(api_key: String, app_key: String) -> Self {
        Self {
            base_url: default_backend_url(),
            api_key,
            app_key,
            timeout_secs: default_backend_timeout_secs(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.app_key.is_empty()
    }
}

fn default_backend_url() -> String {
    "https://api.datadoghq.com".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    10
}

/// External translator (LLM provider) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_translator_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_translator_model")]
    pub model: String,
    #[serde(default = "default_translator_temperature")]
    pub temperature: f32,
    #[serde(default = "default_translator_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslatorConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: default_translator_url(),
            api_key,
            model: default_translator_model(),
            temperature: default_translator_temperature(),
            timeout_secs: default_translator_timeout_secs(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_translator_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_translator_model() -> String {
    "gpt-4.1".to_string()
}

fn default_translator_temperature() -> f32 {
    0.2
}

fn default_translator_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_creation() {
        let config = BackendConfig::new("api".to_string(), "app".to_string())
            .with_base_url("https://api.datadoghq.eu".to_string())
            .with_timeout(5);

        assert!(config.has_credentials());
        assert_eq!(config.base_url, "https://api.datadoghq.eu");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_backend_config_missing_credentials() {
        let config = BackendConfig::new(String::new(), "app".to_string());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_translator_config_defaults() {
        let config = TranslatorConfig::new("sk-test".to_string());

        assert!(config.is_configured());
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_ontology_config_default_path() {
        assert_eq!(OntologyConfig::default().path, "ontology.yaml");
    }
}
