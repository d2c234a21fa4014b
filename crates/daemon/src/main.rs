//! Muster Queue Engine - Main Entry Point
//!
//! Composition root: wires content, gate, and RPC server together.

mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

// Import workspace crates
use muster_api_rpc::{RpcServer, RpcServerConfig};
use muster_core::application::{GateConfig, JoinGate};
use muster_core::port::id_provider::UuidProvider;
use muster_core::port::time_provider::SystemTimeProvider;
use muster_core::port::{ChannelMatchSignal, ContentDirectory, LogNotifier, PolicySet};
use muster_infra_content::{default_content, load_content};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (guard keeps the file writer alive)
    let _log_guard = telemetry::init_logging()?;

    info!("Muster Queue Engine v{} starting...", VERSION);

    // 2. Load configuration
    let rpc_port: u16 = env_parse("MUSTER_RPC_PORT", 9538);

    let defaults = GateConfig::default();
    let gate_config = GateConfig {
        min_level: env_parse("MUSTER_MIN_LEVEL", defaults.min_level),
        max_level: env_parse("MUSTER_MAX_LEVEL", defaults.max_level),
        allow_lfg_mixing: env_parse("MUSTER_ALLOW_LFG_MIXING", defaults.allow_lfg_mixing),
        default_wait_estimate_ms: env_parse(
            "MUSTER_DEFAULT_WAIT_MS",
            defaults.default_wait_estimate_ms,
        ),
    };

    info!(
        min_level = gate_config.min_level,
        max_level = gate_config.max_level,
        "Gate configuration loaded"
    );

    // 3. Load activity content
    let content: Arc<dyn ContentDirectory> = match std::env::var("MUSTER_CONTENT_PATH") {
        Ok(path) => {
            let path = shellexpand::tilde(&path).into_owned();
            info!(path = %path, "Loading activity content...");
            let directory = load_content(std::path::Path::new(&path))
                .map_err(|e| anyhow::anyhow!("Content load failed: {}", e))?;
            Arc::new(directory)
        }
        Err(_) => {
            info!("MUSTER_CONTENT_PATH not set, using built-in content");
            Arc::new(default_content())
        }
    };

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let notifier = Arc::new(LogNotifier);
    let (match_signal, mut change_rx) = ChannelMatchSignal::channel();

    // Extra admission policies plug in here; the gate runs fine without any.
    let policies = PolicySet::new();

    let gate = Arc::new(JoinGate::new(
        gate_config,
        content,
        policies,
        notifier,
        Arc::new(match_signal),
        time_provider,
        id_provider,
    ));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_server = RpcServer::new(rpc_config, gate.clone());
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    // 6. Drain queue-changed signals
    //
    // A matchmaking scheduler would subscribe here. Until one is wired
    // in, the daemon drains the channel so emitters never back up, and
    // logs each nudge for operators.
    let shutdown = CancellationToken::new();
    let drain_shutdown = shutdown.clone();
    let drain_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = drain_shutdown.cancelled() => break,
                change = change_rx.recv() => match change {
                    Some(change) => {
                        debug!(
                            queue = %change.queue_type,
                            bracket = change.bracket,
                            "Queue membership changed"
                        );
                    }
                    None => break,
                },
            }
        }
    });

    info!("System ready. Waiting for join requests...");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown
    shutdown.cancel();
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), drain_handle).await;

    info!("Shutdown complete.");

    Ok(())
}
