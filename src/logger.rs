use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// Sets up:
/// - Console output (stderr), human-readable.
/// - Optional file output: daily rolling `playlist-service.<date>.log` files
///   in `log_dir`, keeping the latest 5.
/// - Environment filter: `RUST_LOG`, defaulting to `info` with the transport's
///   connection chatter turned down.
///
/// Fails if a global subscriber is already installed.
pub fn init(log_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let file_layer = match &log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("playlist-service")
                .filename_suffix("log")
                .max_log_files(5)
                .build(dir)
                .context("Failed to create log file appender")?;
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zeromq=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Logger already initialized")?;

    if let Some(dir) = log_dir {
        tracing::info!(log_dir = %dir.display(), "File logging enabled");
    }
    Ok(())
}
