//! Error taxonomy / 错误类型
//!
//! `ConfigError` is fatal and only produced during startup.
//! `OperationError` is produced per request by the storage layer and is always
//! turned into a status message before the response is built.

use thiserror::Error;

use crate::flash::Category;

/// Startup configuration failure. The process must not serve requests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required AWS credential: {0}")]
    MissingCredential(&'static str),

    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to initialize storage client: {0}")]
    Provider(String),
}

/// A failed provider call, subdivided by cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The provider rejected the credentials (bad key id, bad signature, expired token).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The credentials could not be assembled into a usable signing identity.
    #[error("Partial credentials found: {0}")]
    PartialCredentials(String),

    /// Any other rejection from the provider or the HTTP client.
    #[error("{0}")]
    Client(String),
}

impl OperationError {
    /// Severity tag used when the error becomes a status message.
    pub fn severity(&self) -> Category {
        Category::Danger
    }
}
