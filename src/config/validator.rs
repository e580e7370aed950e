//! Configuration validation with aggregated errors.
//! Every issue found is collected so a broken config can be fixed in one pass.

use tracing::error;

use crate::config::settings::{ServiceConfig, SettingsConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.service_account_email.trim().is_empty() {
        errors.push("settings.service_account_email must not be empty".to_string());
    }

    if settings.default_scope.trim().is_empty() {
        errors.push("settings.default_scope must not be empty".to_string());
    }

    let url = &settings.token_info.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "settings.token_info.url '{}' must be an http(s) url",
            url
        ));
    }

    if settings.server.host.is_empty() {
        errors.push(format!(
            "settings.server.host '{}' must be valid",
            settings.server.host
        ));
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be an integer in range 0-65535",
            settings.server.port
        ));
    }

    // metrics endpoint start with '/'
    let metrics = &settings.metrics;
    if !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }

    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}
