use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::credentials::{CredentialSource, RawToken};
use crate::utils::constants::{
    METADATA_FLAVOR, METADATA_FLAVOR_VALUE, METADATA_HOST_ENV_VAR, METADATA_ROOT,
    METADATA_SERVICE_ACCOUNTS_URI,
};

/// Mints tokens through the Compute Engine metadata server.
#[derive(Debug, Clone)]
pub struct ComputeMetadata {
    client: Client,
    endpoint: String,
}

impl ComputeMetadata {
    pub fn new(client: Client, endpoint_override: Option<String>) -> Self {
        let endpoint = resolve_endpoint(endpoint_override)
            .trim_end_matches('/')
            .to_string();
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn token_url(&self, service_account_email: &str) -> String {
        format!(
            "{}{}/{}/token",
            self.endpoint, METADATA_SERVICE_ACCOUNTS_URI, service_account_email
        )
    }
}

/// A non-empty `GCE_METADATA_HOST` wins over the configured host.
fn resolve_endpoint(endpoint_override: Option<String>) -> String {
    if let Some(host) = std::env::var(METADATA_HOST_ENV_VAR)
        .ok()
        .filter(|h| !h.is_empty())
    {
        format!("http://{host}")
    } else if let Some(endpoint) = endpoint_override {
        endpoint
    } else {
        METADATA_ROOT.to_string()
    }
}

impl CredentialSource for ComputeMetadata {
    async fn get_access_token(
        &self,
        service_account_email: &str,
        scopes: &[String],
    ) -> Result<RawToken> {
        let url = self.token_url(service_account_email);
        debug!(url = %url, scopes = ?scopes, "requesting metadata token");

        let mut request = self
            .client
            .get(&url)
            .header(METADATA_FLAVOR, METADATA_FLAVOR_VALUE);
        if !scopes.is_empty() {
            request = request.query(&[("scopes", scopes.join(","))]);
        }

        let response = request.send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        Ok(RawToken {
            token: body
                .get("access_token")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
            token_type: body
                .get("token_type")
                .and_then(Value::as_str)
                .map(str::to_owned),
            expires_in: body.get("expires_in").and_then(Value::as_u64),
            response: body,
        })
    }
}
