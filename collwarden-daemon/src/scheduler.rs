//! Fixed-interval driver for reconciliation cycles.
//!
//! A cycle runs to completion on the blocking pool before the wait starts,
//! so cycles never overlap. Shutdown is only observed during the wait.

use std::time::Duration;

use tokio::sync::broadcast;

use collwarden_core::{CollectionSource, RosterSource};
use collwarden_sync::{CycleOutcome, Reconciler, SyncError};

use crate::error::DaemonError;

/// One discrete unit of scheduled work.
pub trait Cycle: Send + 'static {
    fn run_cycle(&mut self) -> Result<CycleOutcome, SyncError>;
}

impl<R, C> Cycle for Reconciler<R, C>
where
    R: RosterSource + Send + 'static,
    C: CollectionSource + Send + 'static,
{
    fn run_cycle(&mut self) -> Result<CycleOutcome, SyncError> {
        self.reconcile_once()
    }
}

/// Counters returned when the loop stops cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub cycles: usize,
    pub committed: usize,
    pub failed: usize,
}

/// Run `cycle` now and then every `interval` until a shutdown message
/// arrives (or every sender is dropped).
///
/// Recoverable cycle failures are logged and retried on the next tick.
/// Fatal ones (unusable local state) stop the loop with an error.
pub async fn run<C: Cycle>(
    mut cycle: C,
    interval: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<SchedulerStats, DaemonError> {
    let mut stats = SchedulerStats::default();

    loop {
        let (returned, result) = tokio::task::spawn_blocking(move || {
            let result = cycle.run_cycle();
            (cycle, result)
        })
        .await
        .map_err(|err| DaemonError::Join {
            task: "reconcile",
            message: err.to_string(),
        })?;
        cycle = returned;
        stats.cycles += 1;

        match result {
            Ok(CycleOutcome::NoNewUsers { known }) => {
                tracing::info!(known, "no new users");
            }
            Ok(CycleOutcome::Committed(report)) => {
                stats.committed += 1;
                tracing::info!(
                    new_users = ?report.new_users,
                    descendants = report.descendants.len(),
                    grants = report.grants,
                    known = report.known,
                    duration_ms = report.duration_ms,
                    "reconciliation cycle committed",
                );
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(error = %err, "local state unusable, stopping");
                return Err(err.into());
            }
            Err(err) => {
                stats.failed += 1;
                tracing::error!(
                    error = %err,
                    "reconciliation cycle aborted without commit, retrying next interval",
                );
            }
        }

        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    Ok(stats)
}
