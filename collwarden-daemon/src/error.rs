use thiserror::Error;

/// Error surface for daemon startup and the scheduler loop.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("configuration error: {0}")]
    Config(#[from] collwarden_core::ConfigError),

    #[error("sync error: {0}")]
    Sync(#[from] collwarden_sync::SyncError),

    #[error("{what} failed: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{task} task join failure: {message}")]
    Join { task: &'static str, message: String },
}

pub(crate) fn io_err(what: &'static str, source: std::io::Error) -> DaemonError {
    DaemonError::Io { what, source }
}
