//! # collwarden-sync
//!
//! Crash-safe known-user state and the permission reconciliation cycle.
//!
//! Call [`Reconciler::reconcile_once`] to run one full cycle: diff the
//! roster against [`state_store`], grant the permission profile to every new
//! user, then commit the roster snapshot.

pub mod error;
pub mod reconciler;
pub mod state_store;

pub use error::SyncError;
pub use reconciler::{ensure_permission, CycleOutcome, CycleReport, Reconciler};
pub use state_store::{StateFile, StateStore};
