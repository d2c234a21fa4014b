//! Logging setup for the daemon
//!
//! Console output by default; set `MUSTER_LOG_DIR` to also roll daily
//! log files, and `MUSTER_LOG_FORMAT=json` for structured output.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// # Environment Variables
///
/// - `RUST_LOG`: standard env-filter directives (default: `muster=info`)
/// - `MUSTER_LOG_FORMAT`: `pretty` (default) or `json`
/// - `MUSTER_LOG_DIR`: when set, write daily-rolled `musterd.log` files
///   there instead of the console
///
/// The returned guard must stay alive for the process lifetime so the
/// non-blocking file writer flushes on shutdown.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    let log_format = std::env::var("MUSTER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("muster=info"))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match std::env::var("MUSTER_LOG_DIR") {
        Ok(dir) => {
            let dir = shellexpand::tilde(&dir).into_owned();
            let appender = tracing_appender::rolling::daily(&dir, "musterd.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            match log_format.as_str() {
                "json" => {
                    registry
                        .with(fmt::layer().json().with_writer(writer).with_ansi(false))
                        .init();
                }
                _ => {
                    registry
                        .with(fmt::layer().with_writer(writer).with_ansi(false))
                        .init();
                }
            }

            Ok(Some(guard))
        }
        Err(_) => {
            match log_format.as_str() {
                "json" => {
                    // Production: JSON structured logging
                    registry.with(fmt::layer().json()).init();
                }
                _ => {
                    // Development: Pretty formatting with colors
                    registry.with(fmt::layer().pretty()).init();
                }
            }

            Ok(None)
        }
    }
}
