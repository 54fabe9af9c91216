//! The permission reconciliation cycle.
//!
//! One cycle: load known users, diff against the roster, and for each new
//! user grant full access on the root collection and read-only access on
//! every descendant. The roster snapshot is committed only after every grant
//! in the cycle succeeded; any failure leaves the state file untouched so the
//! next cycle redoes the same users from scratch.

use std::time::Instant;

use serde::Serialize;

use collwarden_core::{
    hierarchy::descendants_of, membership::merge_grant, Access, CollectionId, CollectionSource,
    RemoteError, RosterSource, UserId,
};

use crate::error::SyncError;
use crate::state_store::StateStore;

/// Result of a cycle that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Roster had no users beyond the known set; nothing was written.
    NoNewUsers { known: usize },
    /// Every new user was granted and the roster snapshot was persisted.
    Committed(CycleReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub new_users: Vec<UserId>,
    /// Descendants of the root resolved from this cycle's collection snapshot.
    pub descendants: Vec<CollectionId>,
    /// Number of successful `ensure_permission` calls.
    pub grants: usize,
    /// Size of the committed known-user set.
    pub known: usize,
    pub duration_ms: u128,
}

/// Drives reconciliation cycles against one root collection.
#[derive(Debug)]
pub struct Reconciler<R, C> {
    store: StateStore,
    roster: R,
    collections: C,
    root: CollectionId,
}

impl<R, C> Reconciler<R, C>
where
    R: RosterSource,
    C: CollectionSource,
{
    pub fn new(store: StateStore, roster: R, collections: C, root: CollectionId) -> Self {
        Self {
            store,
            roster,
            collections,
            root,
        }
    }

    pub fn root(&self) -> CollectionId {
        self.root
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Run one full cycle.
    pub fn reconcile_once(&self) -> Result<CycleOutcome, SyncError> {
        let started = Instant::now();

        let known = self.store.load()?;
        let roster = self.roster.list_user_ids()?;
        let new_users: Vec<UserId> = roster.difference(&known).copied().collect();

        if new_users.is_empty() {
            tracing::debug!(known = known.len(), roster = roster.len(), "no new users");
            return Ok(CycleOutcome::NoNewUsers { known: known.len() });
        }
        tracing::info!(new_users = ?new_users, "new users detected");

        let collections = self.collections.list_collections()?;
        let descendants = descendants_of(&collections, self.root);
        tracing::debug!(
            root = %self.root,
            descendants = ?descendants,
            "resolved collection hierarchy",
        );

        let mut grants = 0usize;
        for &user in &new_users {
            self.grant(user, self.root, Access::Full)?;
            grants += 1;
            for &collection in &descendants {
                self.grant(user, collection, Access::ReadOnly)?;
                grants += 1;
            }
        }

        self.store.save(&roster)?;

        Ok(CycleOutcome::Committed(CycleReport {
            new_users,
            descendants,
            grants,
            known: roster.len(),
            duration_ms: started.elapsed().as_millis(),
        }))
    }

    fn grant(&self, user: UserId, collection: CollectionId, access: Access) -> Result<(), SyncError> {
        ensure_permission(&self.collections, user, collection, access).map_err(|err| {
            tracing::warn!(
                user = %user,
                collection = %collection,
                access = %access,
                op = err.op(),
                status = ?err.status(),
                error = %err,
                "grant failed, aborting cycle without commit",
            );
            SyncError::from(err)
        })
    }
}

/// Give `user` exactly `access` on one collection.
///
/// Fetches the current record, merges the membership, and writes the whole
/// record back. Idempotent: a second identical call produces the same record.
pub fn ensure_permission<C>(
    collections: &C,
    user: UserId,
    collection: CollectionId,
    access: Access,
) -> Result<(), RemoteError>
where
    C: CollectionSource + ?Sized,
{
    let mut record = collections.get_collection(collection)?;
    record.members = merge_grant(std::mem::take(&mut record.members), user, access);
    collections.replace_collection(&record)?;
    tracing::info!(
        user = %user,
        collection = %collection,
        access = %access,
        "updated permissions",
    );
    Ok(())
}
