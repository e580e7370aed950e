use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst};
use tracing::debug;

use crate::helpers::time::now_millis;
use crate::token_info::{TokenInfo, TokenInspector};

/// https://oauth2.googleapis.com/tokeninfo answers with numbers encoded as
/// strings; accept both.
#[serde_with::serde_as]
#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    expires_in: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    exp: Option<i64>,
    scope: Option<String>,
    aud: Option<String>,
    azp: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    user_id: Option<String>,
}

/// Stateless client for the tokeninfo endpoint; needs no credentials of its own.
#[derive(Debug, Clone)]
pub struct TokenInfoClient {
    client: Client,
    url: String,
}

impl TokenInfoClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl TokenInspector for TokenInfoClient {
    async fn get_token_info(&self, access_token: &str) -> Result<TokenInfo> {
        debug!(url = %self.url, "requesting token info");
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(access_token)
            .form(&[("access_token", access_token)])
            .send()
            .await?
            .error_for_status()?;

        let body: TokenInfoResponse = response.json().await?;
        let expiry_date = match (body.expires_in, body.exp) {
            (Some(expires_in), _) => expires_in
                .checked_mul(1000)
                .and_then(|ms| now_millis().checked_add(ms)),
            (None, Some(exp)) => exp.checked_mul(1000),
            (None, None) => return Err(anyhow!("token info response has no expiry")),
        }
        .ok_or_else(|| anyhow!("token info expiry out of range"))?;

        Ok(TokenInfo {
            expiry_date,
            scopes: body
                .scope
                .map(|s| s.split(' ').map(str::to_owned).collect())
                .unwrap_or_default(),
            aud: body.aud,
            azp: body.azp,
            sub: body.sub,
            email: body.email,
            user_id: body.user_id,
        })
    }
}
