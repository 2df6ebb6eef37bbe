use std::time::Duration;
use thiserror::Error;

use crate::core::models::Tag;

#[derive(Debug, Error)]
pub enum ClarifyError {
    #[error("{capability} API not available in this context. Please ensure Chrome 121+ is installed and AI APIs are enabled.")]
    CapabilityUnavailable { capability: &'static str },

    #[error("{operation} not supported on this device. Please check Chrome settings.")]
    UnsupportedConfiguration { operation: &'static str },

    #[error("{capability} request timed out after {after:?}")]
    Timeout {
        capability: &'static str,
        after: Duration,
    },

    #[error("Please select some medical text first")]
    EmptyInput,

    #[error("A handler is already registered for '{0}'")]
    DuplicateHandler(Tag),

    #[error("Host AI capability failed: {0}")]
    HostError(String),

    #[error("Failed to access settings storage: {0}")]
    StorageError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ClarifyError {
    /// Whether the error is one the user can act on (as opposed to a generic failure).
    #[must_use]
    pub fn is_capability_error(&self) -> bool {
        matches!(
            self,
            ClarifyError::CapabilityUnavailable { .. }
                | ClarifyError::UnsupportedConfiguration { .. }
                | ClarifyError::Timeout { .. }
        )
    }
}

impl From<reqwest::Error> for ClarifyError {
    fn from(error: reqwest::Error) -> Self {
        ClarifyError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for ClarifyError {
    fn from(error: serde_json::Error) -> Self {
        ClarifyError::StorageError(error.to_string())
    }
}

impl From<anyhow::Error> for ClarifyError {
    fn from(error: anyhow::Error) -> Self {
        ClarifyError::HostError(error.to_string())
    }
}
