//! Logging setup
//!
//! `RUST_LOG` overrides the default filter in every mode.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// JSON lines on stdout, for the HTTP service
    Json,
    /// Compact text on stderr, for line mode
    Stderr,
    /// Append to a file, for the full-screen UI
    File(PathBuf),
    /// Discard everything
    Off,
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global tracing subscriber
///
/// # Errors
/// Fails if the log file cannot be opened.
pub fn init(target: LogTarget) -> Result<()> {
    match target {
        LogTarget::Json => {
            let fmt_layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .json();
            tracing_subscriber::registry()
                .with(filter("info,actix_web=info,actix_server=info"))
                .with(fmt_layer)
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter("warn"))
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter("info"))
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        LogTarget::Off => {
            tracing_subscriber::registry()
                .with(EnvFilter::new("off"))
                .with(fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}
