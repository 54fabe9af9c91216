//! Error types for collwarden-core.

use thiserror::Error;

use crate::types::CollectionId;

/// Invalid or missing startup configuration. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing LINKWARDEN_TOKEN env var")]
    MissingToken,

    #[error("missing ROOT_COLLECTION_ID env var")]
    MissingRootCollection,

    #[error("ROOT_COLLECTION_ID must be an integer, got '{value}'")]
    InvalidRootCollection { value: String },

    #[error("POLL_INTERVAL must be a positive number of seconds, got '{value}'")]
    InvalidPollInterval { value: String },

    #[error("REQUEST_TIMEOUT must be a positive number of seconds, got '{value}'")]
    InvalidRequestTimeout { value: String },

    #[error("LOG_FORMAT must be 'text' or 'json', got '{value}'")]
    InvalidLogFormat { value: String },
}

/// Failure talking to the remote bookmark service.
///
/// Every variant is recoverable at cycle granularity: the current cycle is
/// aborted and the next scheduled cycle retries from the last committed state.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network failure, timeout, or a 5xx response.
    #[error("{op}: remote unavailable: {detail}")]
    Unavailable { op: String, detail: String },

    /// The response did not have the expected shape.
    #[error("{op}: unexpected response: {detail}")]
    Protocol { op: String, detail: String },

    /// A 4xx response other than 404.
    #[error("{op}: rejected with HTTP {status}: {body}")]
    Rejected { op: String, status: u16, body: String },

    /// The collection no longer exists.
    #[error("{op}: collection {collection} not found")]
    NotFound { op: String, collection: CollectionId },
}

impl RemoteError {
    /// Short label of the failed operation, e.g. `GET /collections/12`.
    pub fn op(&self) -> &str {
        match self {
            RemoteError::Unavailable { op, .. }
            | RemoteError::Protocol { op, .. }
            | RemoteError::Rejected { op, .. }
            | RemoteError::NotFound { op, .. } => op,
        }
    }

    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => Some(*status),
            RemoteError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}
