//! Error types for collwarden-sync.

use std::path::PathBuf;

use thiserror::Error;

use collwarden_core::RemoteError;

/// All errors that can abort a reconciliation cycle.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The state file exists but is not a valid state document.
    #[error("state file {path} is corrupt: {source}")]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The state file or its directory could not be read or created.
    #[error("failed to read state at {path}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The new state could not be written; nothing was committed.
    #[error("failed to write state at {path}: {source}")]
    StateWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A call to the bookmark service failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SyncError {
    /// Local state is unusable; retrying next cycle would not help.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::StateCorrupt { .. } | SyncError::StateRead { .. }
        )
    }
}

pub(crate) fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::StateRead {
        path: path.into(),
        source,
    }
}

pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::StateWriteFailed {
        path: path.into(),
        source,
    }
}
