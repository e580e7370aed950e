use std::{io, path::PathBuf};

/// The credential exchange completed but produced no usable token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AccessTokenError {
    pub message: String,
}

impl AccessTokenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config format: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("config is not valid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
