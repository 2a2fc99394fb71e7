use std::io;

use thiserror::Error;

/// Failure of one store request, already normalized from the HTTP response.
///
/// The message is meant for the user: it comes from the response body's
/// `error` or `message` field when present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    ValidationRejected { status: u16, message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Network(String),
}

impl StoreError {
    /// HTTP status behind the failure, when it is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::NotFound(_) => Some(404),
            StoreError::ValidationRejected { status, .. } | StoreError::Server { status, .. } => {
                Some(*status)
            }
            StoreError::Network(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start store runtime: {0}")]
    Runtime(#[from] io::Error),
}
