use std::sync::Arc;

use anyhow::{anyhow, Result};
use reqwest::Client;
use tracing::{debug, error};

use crate::config::settings::SettingsConfig;
use crate::credentials::{ComputeMetadata, CredentialSource};
use crate::error::AccessTokenError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::{
    get_metrics, REASON_CREDENTIALS, REASON_INVALID_ENVIRONMENT, REASON_TOKEN_INFO,
};
use crate::token::access_token::AccessTokenData;
use crate::token_info::{TokenInfoClient, TokenInspector};
use crate::utils::constants::{INVALID_ENVIRONMENT, SAFETY_MARGIN_MS};

/// Fetcher backed by the metadata server and the Google tokeninfo endpoint.
pub type GoogleTokenFetcher = TokenFetcher<ComputeMetadata, TokenInfoClient>;

/// Mints access tokens for the configured service account and shortens their
/// expiry by `SAFETY_MARGIN_MS`.
#[derive(Debug, Clone)]
pub struct TokenFetcher<C, I> {
    settings: Arc<SettingsConfig>,
    credentials: C,
    inspector: I,
}

impl<C, I> TokenFetcher<C, I>
where
    C: CredentialSource + Sync,
    I: TokenInspector + Sync,
{
    pub fn new(settings: Arc<SettingsConfig>, credentials: C, inspector: I) -> Self {
        Self {
            settings,
            credentials,
            inspector,
        }
    }

    pub fn settings(&self) -> &SettingsConfig {
        &self.settings
    }

    /// Get an access token for the space-delimited `scope`.
    ///
    /// Fails with [`AccessTokenError`] ("invalid environment") when the
    /// credential source answers without a token. Errors from either remote
    /// call are returned as they were raised.
    #[tracing::instrument(level = "debug", skip(self), fields(service_account = %self.settings.service_account_email))]
    pub async fn get_access_token(&self, scope: &str) -> Result<AccessTokenData> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.access_token_requests.inc();

        let result = self.fetch(scope).await;

        metrics
            .access_token_duration
            .observe(start.elapsed().as_secs_f64());
        if let Ok(data) = &result {
            metrics.access_token_expiry_date.set(data.expiry_date);
        }
        result
    }

    async fn fetch(&self, scope: &str) -> Result<AccessTokenData> {
        let metrics = get_metrics().await;
        let scopes: Vec<String> = scope.split(' ').map(str::to_owned).collect();

        let raw = self
            .credentials
            .get_access_token(&self.settings.service_account_email, &scopes)
            .await
            .inspect_err(|_| {
                metrics
                    .access_token_failures
                    .with_label_values(&[REASON_CREDENTIALS])
                    .inc();
            })?;

        let Some(access_token) = raw.token.clone() else {
            error!(response = ?raw, "google access token request failed");
            metrics
                .access_token_failures
                .with_label_values(&[REASON_INVALID_ENVIRONMENT])
                .inc();
            return Err(AccessTokenError::new(INVALID_ENVIRONMENT).into());
        };

        let token_info = self
            .inspector
            .get_token_info(&access_token)
            .await
            .inspect_err(|_| {
                metrics
                    .access_token_failures
                    .with_label_values(&[REASON_TOKEN_INFO])
                    .inc();
            })?;
        debug!(expiry_date = token_info.expiry_date, "token info received");

        let expiry_date = token_info
            .expiry_date
            .checked_sub(SAFETY_MARGIN_MS)
            .ok_or_else(|| anyhow!("token info expiry out of range"))?;
        Ok(AccessTokenData::new(access_token, expiry_date))
    }
}

impl GoogleTokenFetcher {
    /// Builds the HTTP-backed fetcher from loaded settings.
    pub fn from_settings(settings: Arc<SettingsConfig>, client: Client) -> Self {
        let credentials = ComputeMetadata::new(client.clone(), settings.metadata.host.clone());
        let inspector = TokenInfoClient::new(client, settings.token_info.url.clone());
        Self::new(settings, credentials, inspector)
    }
}
