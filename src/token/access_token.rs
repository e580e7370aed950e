use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token handed to callers. `expiry_date` (milliseconds since epoch)
/// already has the safety margin applied.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenData {
    pub access_token: String,
    pub expiry_date: i64,
}

impl AccessTokenData {
    pub fn new(access_token: String, expiry_date: i64) -> Self {
        Self {
            access_token,
            expiry_date,
        }
    }
}

impl fmt::Debug for AccessTokenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenData")
            .field("access_token", &crate::SENSITIVE)
            .field("expiry_date", &self.expiry_date)
            .finish()
    }
}
