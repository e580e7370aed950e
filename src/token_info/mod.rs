//! Token introspection: asks the provider what a bearer token grants and when
//! it expires.

use anyhow::Result;

pub mod client;

pub use client::TokenInfoClient;

pub trait TokenInspector {
    fn get_token_info(
        &self,
        access_token: &str,
    ) -> impl std::future::Future<Output = Result<TokenInfo>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// absolute expiry, milliseconds since epoch
    pub expiry_date: i64,
    pub scopes: Vec<String>,
    pub aud: Option<String>,
    pub azp: Option<String>,
    pub sub: Option<String>,
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl TokenInfo {
    pub fn new(expiry_date: i64) -> Self {
        Self {
            expiry_date,
            scopes: Vec::new(),
            aud: None,
            azp: None,
            sub: None,
            email: None,
            user_id: None,
        }
    }
}
