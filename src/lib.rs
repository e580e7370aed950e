//! # Google Access Token Library
//!
//! Requests access tokens from the Compute Engine metadata server using the
//! ambient service-account identity, resolves their expiry through token
//! introspection and hands them out with a 5 minute early-expiry margin.
//!
//! Modules:
//! - `config` — service configuration, loading and validation
//! - `credentials` — credential sources (metadata server)
//! - `token_info` — token introspection (tokeninfo endpoint)
//! - `token` — `TokenFetcher` and the `AccessTokenData` it returns
//! - `server` — HTTP endpoint serving tokens and metrics

pub mod config;
pub mod credentials;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod server;
pub mod token;
pub mod token_info;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::settings::{ServiceConfig, SettingsConfig};
pub use crate::error::{AccessTokenError, ConfigurationError};
pub use crate::token::{AccessTokenData, GoogleTokenFetcher, TokenFetcher};

const SENSITIVE: &str = "***";
