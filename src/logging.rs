//! Tracing subscriber setup

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

/// Install the global tracing subscriber.
///
/// The returned guard flushes buffered log lines when dropped and must be kept
/// alive for the lifetime of the program.
pub fn init(options: &LogOptions) -> anyhow::Result<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (writer, guard) = match &options.file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(options.file.is_none());

    let result = if options.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
