//! Tracing initialization shared by the server and the CLI.
//!
//! Reads `RUST_LOG` (filter, default `info,hyper_util=off`) and `LOG_FILE` (path). With
//! `LOG_FILE` set, logs are appended to that file without ANSI through a non-blocking writer;
//! otherwise they go to stderr so stdout stays clean for command output.

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const DEFAULT_FILTER: &str = "info,hyper_util=off";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("open log file {path}: {source}")]
    OpenFile {
        path: String,
        source: std::io::Error,
    },
    #[error("install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Keep the returned guard alive for the process lifetime when
/// logging to a file; dropping it flushes and stops the writer thread.
pub fn init() -> Result<Option<WorkerGuard>, LoggingError> {
    match std::env::var("LOG_FILE").ok().filter(|p| !p.is_empty()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggingError::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            tracing_subscriber::registry().with(layer).try_init()?;
            tracing::info!(path = %path, "logging to file");
            Ok(Some(guard))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter());
            tracing_subscriber::registry().with(layer).try_init()?;
            Ok(None)
        }
    }
}
