//! # Configuration
//!
//! Application configuration with serde defaults, loadable from TOML or
//! JSON files. The search-provider API key is the one required ambient
//! secret; resolving it fails loudly at startup instead of surfacing
//! later as an opaque provider error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::analysis::DEFAULT_CLICKBAIT_PHRASES;
use crate::api::SortOrder;
use crate::defaults;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// News provider settings
    pub news: NewsSettings,
    /// Analysis settings
    pub analysis: AnalysisSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// News provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    /// API key; falls back to the environment when absent
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Articles requested per search
    pub page_size: usize,
    /// Result ordering
    pub sort_by: SortOrder,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "NEWS_API_KEY".to_string(),
            page_size: defaults::DEFAULT_PAGE_SIZE,
            sort_by: SortOrder::PublishedAt,
        }
    }
}

impl NewsSettings {
    /// Resolve the API key from the config or the environment.
    ///
    /// Missing key is a startup-time configuration failure, never passed
    /// down to the provider.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Clickbait trigger phrases; data, not code, so tests and deploys
    /// can substitute their own list
    pub clickbait_phrases: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            clickbait_phrases: DEFAULT_CLICKBAIT_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from a TOML or JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::FileError(e.to_string()))?;

    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string())),
        "json" => {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
        }
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("config file error: {0}")]
    FileError(String),
    /// Parse error
    #[error("config parse error: {0}")]
    ParseError(String),
    /// Unsupported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// The provider API key is configured nowhere
    #[error("missing news provider API key: set {0} or news.api_key in the config file")]
    MissingApiKey(String),
}
