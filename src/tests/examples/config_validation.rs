#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::loader::{file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::error::ConfigurationError;

    #[tokio::test]
    async fn deploy_config_is_valid() {
        let path = Path::new("deploy/google-access-token.yaml");
        let service_config = file_to_config(path)
            .await
            .expect("deploy/google-access-token.yaml must exist in repo root for tests");

        let settings = service_config.settings;
        assert!(!settings.service_account_email.is_empty());
        assert!(settings.metrics.is_enabled);
        assert_eq!(settings.logging.unwrap().format, LogFormat::Json);
    }

    #[tokio::test]
    async fn invalid_config_reports_all_errors() {
        let invalid_yaml = r#"
settings:
  service_account_email: ""
  token_info:
    url: "tokeninfo"
  server:
    host: 127.0.0.1
    port: "eighty"
  metrics:
    is_enabled: true
    path: "metrics"
  logging:
    level: verbose
    format: compact
"#;
        match parse_config(invalid_yaml.to_string()).await {
            Ok(cfg) => panic!("invalid config unexpectedly validated: {cfg:?}"),
            Err(ConfigurationError::Invalid(errs)) => {
                assert_eq!(errs.len(), 5, "{errs:?}");
                assert!(errs.iter().any(|e| e.contains("service_account_email")));
                assert!(errs.iter().any(|e| e.contains("token_info.url")));
                assert!(errs.iter().any(|e| e.contains("server.port")));
                assert!(errs.iter().any(|e| e.contains("metrics.path")));
                assert!(errs.iter().any(|e| e.contains("logging.level")));
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
