use serde::Deserialize;

use crate::utils::constants::{DEFAULT_SCOPE, TOKEN_INFO_URL};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// identity the metadata server mints tokens for
    pub service_account_email: String,
    /// used when a caller does not name a scope
    #[serde(default = "default_scope")]
    pub default_scope: String,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub token_info: TokenInfoConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
}

impl SettingsConfig {
    pub fn new(service_account_email: impl Into<String>) -> Self {
        Self {
            service_account_email: service_account_email.into(),
            default_scope: default_scope(),
            metadata: MetadataConfig::default(),
            token_info: TokenInfoConfig::default(),
            server: ServerConfig::default(),
            metrics: MetricsConfig::default(),
            logging: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetadataConfig {
    /// metadata server root, e.g. `http://169.254.169.254`.
    /// `GCE_METADATA_HOST` takes precedence.
    pub host: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenInfoConfig {
    #[serde(default = "default_token_info_url")]
    pub url: String,
}

impl Default for TokenInfoConfig {
    fn default() -> Self {
        Self {
            url: default_token_info_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: "8080".to_owned(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_token_info_url() -> String {
    TOKEN_INFO_URL.to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
