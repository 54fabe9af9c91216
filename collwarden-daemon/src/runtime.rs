use tokio::sync::broadcast;

use collwarden_client::LinkwardenClient;
use collwarden_core::Config;
use collwarden_sync::{Reconciler, StateStore};

use crate::error::{io_err, DaemonError};
use crate::scheduler;

/// Read the configuration from the environment, then block in [`run`].
pub fn start_from_env() -> Result<(), DaemonError> {
    let config = Config::from_env()?;
    start_blocking(config)
}

/// Start the runtime and block the current thread until the agent exits.
pub fn start_blocking(config: Config) -> Result<(), DaemonError> {
    init_tracing(config.log_json);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio runtime startup", e))?;
    runtime.block_on(run(config))
}

/// Run the agent until SIGINT/SIGTERM or a fatal state error.
pub async fn run(config: Config) -> Result<(), DaemonError> {
    tracing::info!(
        base_url = %config.base_url,
        root = %config.root_collection,
        poll_interval_secs = config.poll_interval.as_secs(),
        state = %config.state_path.display(),
        "starting collwarden",
    );

    // A corrupt state file must stop startup, not the first cycle.
    let store = StateStore::new(&config.state_path);
    let known = store.load()?;
    tracing::info!(known = known.len(), "loaded known users");

    let client = LinkwardenClient::new(&config);
    let reconciler = Reconciler::new(store, client.clone(), client, config.root_collection);

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(4);
    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            match shutdown_signal().await {
                Ok(signal) => {
                    tracing::info!(signal, "received shutdown signal, stopping after current cycle");
                    let _ = shutdown.send(());
                }
                Err(err) => {
                    tracing::warn!(error = %err, "signal handler failed; stop the process externally");
                }
            }
        })
    };

    let result = scheduler::run(reconciler, config.poll_interval, shutdown_rx).await;
    signal_handle.abort();
    drop(shutdown_tx);

    let stats = result?;
    tracing::info!(
        cycles = stats.cycles,
        committed = stats.committed,
        failed = stats.failed,
        "collwarden stopped",
    );
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<&'static str, DaemonError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).map_err(|e| io_err("SIGTERM handler install", e))?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.map_err(|e| io_err("ctrl-c handler", e))?;
            Ok("SIGINT")
        }
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<&'static str, DaemonError> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| io_err("ctrl-c handler", e))?;
    Ok("ctrl-c")
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
