//! `collwarden` — keep bookmark collection permissions in step with the
//! user roster.
//!
//! Configured entirely through the environment; see
//! `collwarden_core::config` for the recognised variables. Runs until
//! SIGINT/SIGTERM and exits non-zero on invalid configuration or corrupt
//! local state.

use anyhow::{Context, Result};

fn main() -> Result<()> {
    collwarden_daemon::start_from_env().context("collwarden exited with error")
}
