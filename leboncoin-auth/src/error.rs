use leboncoin_api::{ApiError, FailureKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity service error: {0}")]
    Identity(#[from] ApiError),
}

impl AuthError {
    /// Classification of the failure for user-facing reporting.
    /// Anything that did not come back from the identity service is `Unknown`.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AuthError::Identity(err) => err.kind(),
            _ => FailureKind::Unknown,
        }
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
