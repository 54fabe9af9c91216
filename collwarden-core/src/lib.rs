//! Collwarden core library — domain types, configuration, errors, and the
//! pure parts of permission reconciliation.
//!
//! - [`types`] — identifiers, collection and membership records
//! - [`config`] — [`Config`] built once at startup from the environment
//! - [`error`] — [`ConfigError`] and [`RemoteError`]
//! - [`hierarchy`] — descendant resolution over the flat collection list
//! - [`membership`] — the membership merge applied by every grant
//! - [`remote`] — traits implemented by the remote service client

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod membership;
pub mod remote;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, RemoteError};
pub use remote::{CollectionSource, RosterSource};
pub use types::{Access, Collection, CollectionId, KnownUsers, Membership, UserId};
