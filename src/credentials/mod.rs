//! Credentials module
//!
//! A credential source mints access tokens for a service account without any
//! explicit key material; the execution environment supplies the identity.

use anyhow::Result;
use serde_json::Value;
use std::fmt;

pub mod compute;

pub use compute::ComputeMetadata;

pub trait CredentialSource {
    fn get_access_token(
        &self,
        service_account_email: &str,
        scopes: &[String],
    ) -> impl std::future::Future<Output = Result<RawToken>> + Send;
}

/// Credential source output. `token` is `None` when the provider answered
/// without a usable token.
#[derive(Clone, Default, PartialEq)]
pub struct RawToken {
    pub token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    /// provider response as received
    pub response: Value,
}

impl RawToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()).filter(|t: &String| !t.is_empty()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut response = self.response.clone();
        if let Some(token) = response.get_mut("access_token") {
            *token = Value::from(crate::SENSITIVE);
        }
        f.debug_struct("RawToken")
            .field("token", &self.token.as_ref().map(|_| crate::SENSITIVE))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("response", &response)
            .finish()
    }
}
