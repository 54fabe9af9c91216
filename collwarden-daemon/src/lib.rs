//! Long-running reconciliation agent: scheduler loop, signal handling, and
//! tracing setup around the `collwarden-sync` cycle.

mod error;
mod runtime;
pub mod scheduler;

pub use error::DaemonError;
pub use runtime::{run, start_blocking, start_from_env};
pub use scheduler::{Cycle, SchedulerStats};
