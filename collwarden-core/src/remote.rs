//! Seams to the remote bookmark service.
//!
//! The HTTP client in `collwarden-client` implements both traits; the
//! reconciler only ever sees them through these signatures.

use std::collections::BTreeSet;

use crate::error::RemoteError;
use crate::types::{Collection, CollectionId, UserId};

/// Source of the current user roster.
pub trait RosterSource {
    /// Every user id known to the service. Single page, no pagination.
    fn list_user_ids(&self) -> Result<BTreeSet<UserId>, RemoteError>;
}

/// Read and full-record replace access to collections.
pub trait CollectionSource {
    fn list_collections(&self) -> Result<Vec<Collection>, RemoteError>;

    /// Fails with [`RemoteError::NotFound`] if `id` no longer exists.
    fn get_collection(&self, id: CollectionId) -> Result<Collection, RemoteError>;

    /// Replace the whole record, members included.
    fn replace_collection(&self, collection: &Collection) -> Result<(), RemoteError>;
}

impl<T: RosterSource + ?Sized> RosterSource for &T {
    fn list_user_ids(&self) -> Result<BTreeSet<UserId>, RemoteError> {
        (**self).list_user_ids()
    }
}

impl<T: CollectionSource + ?Sized> CollectionSource for &T {
    fn list_collections(&self) -> Result<Vec<Collection>, RemoteError> {
        (**self).list_collections()
    }

    fn get_collection(&self, id: CollectionId) -> Result<Collection, RemoteError> {
        (**self).get_collection(id)
    }

    fn replace_collection(&self, collection: &Collection) -> Result<(), RemoteError> {
        (**self).replace_collection(collection)
    }
}
