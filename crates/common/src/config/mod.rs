//! Configuration management for EduRAG
//!
//! Supports loading configuration from:
//! - Default values
//! - The plain environment variables used by earlier deployments
//!   (`AZURE_SEARCH_ENDPOINT`, `AZURE_SEARCH_KEY`, `AZURE_SEARCH_INDEX`, `GROQ_API_KEY`)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Environment variables prefixed with APP__ (e.g. APP__SEARCH__TOP=5)

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};

/// Plain environment variables mapped onto configuration keys.
///
/// They are applied as defaults, so files and `APP__` variables win.
pub const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("AZURE_SEARCH_ENDPOINT", "search.endpoint"),
    ("AZURE_SEARCH_KEY", "search.api_key"),
    ("AZURE_SEARCH_INDEX", "search.index"),
    ("GROQ_API_KEY", "llm.api_key"),
];

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Search index configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Completion service configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Pipeline behaviour
    #[serde(default)]
    pub rag: RagConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search service endpoint, e.g. https://my-service.search.windows.net
    #[serde(default)]
    pub endpoint: String,

    /// Admin or query key
    #[serde(default)]
    pub api_key: String,

    /// Index holding the pre-chunked notes
    #[serde(default)]
    pub index: String,

    /// REST API version
    #[serde(default = "default_search_api_version")]
    pub api_version: String,

    /// Number of hits fed into the prompt
    #[serde(default = "default_top")]
    pub top: usize,

    /// Request timeout in seconds (transport default when unset)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds (transport default when unset)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RagConfig {
    /// Prefix every context chunk with its source label
    #[serde(default)]
    pub include_sources: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level / filter directive (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_search_api_version() -> String { "2023-11-01".to_string() }
fn default_top() -> usize { crate::DEFAULT_TOP }
fn default_llm_base_url() -> String { "https://api.groq.com/openai/v1".to_string() }
fn default_llm_model() -> String { crate::DEFAULT_COMPLETION_MODEL.to_string() }
fn default_temperature() -> f32 { 0.2 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 0 }
fn default_service_name() -> String { "edurag".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            index: String::new(),
            api_version: default_search_api_version(),
            top: default_top(),
            timeout_secs: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Self::base_builder(|key| std::env::var(key).ok())?
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific configuration file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Self::base_builder(|key| std::env::var(key).ok())?
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Builder seeded with the plain environment variables as defaults
    fn base_builder<F>(lookup: F) -> Result<ConfigBuilder<DefaultState>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder();
        for (var, key) in LEGACY_ENV_KEYS {
            if let Some(value) = lookup(*var).filter(|v| !v.is_empty()) {
                builder = builder.set_default(*key, value)?;
            }
        }
        Ok(builder)
    }

    /// Names of credentials that are still empty.
    ///
    /// Missing values are not fatal; the first request that needs them fails
    /// downstream instead.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.search.endpoint.is_empty() {
            missing.push("search.endpoint");
        }
        if self.search.api_key.is_empty() {
            missing.push("search.api_key");
        }
        if self.search.index.is_empty() {
            missing.push("search.index");
        }
        if self.llm.api_key.is_empty() {
            missing.push("llm.api_key");
        }
        missing
    }
}
