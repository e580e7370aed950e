use std::path::Path;

use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{LoggingConfig, ServiceConfig};
use crate::config::validator;
use crate::error::ConfigurationError;
use crate::observability::metrics::get_metrics;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig, ConfigurationError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig, ConfigurationError> {
    let metrics = get_metrics().await;
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content).inspect_err(|e| {
        error!("parse config error: {}", e);
        metrics.config_validation_errors.inc();
    })?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }
    service_config.settings.metadata.host = service_config
        .settings
        .metadata
        .host
        .take()
        .filter(|host| !host.trim().is_empty());

    debug!("validation config ...");
    validator::validate_service_config(&service_config).map_err(|issues| {
        metrics.config_validation_errors.inc_by(issues.len() as u64);
        ConfigurationError::Invalid(issues)
    })?;

    Ok(service_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with values from the environment.
fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("env placeholder regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
