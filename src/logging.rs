//! Logging initialization for Drive Index.
//!
//! `RUST_LOG`, when set, replaces the configured level entirely. Otherwise
//! the configured level applies to this crate and the HTTP tracing layer,
//! while the HTTP client stack stays at `warn`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{IndexError, Result};

/// Targets that are noisy at debug level and kept at `warn`.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(level: &str) -> String {
    let level = parse_level(level).to_string().to_lowercase();
    let mut directives = vec![level];
    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    directives.join(",")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Open the log file for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Initialize logging to stdout and the configured log file.
///
/// An empty `file` logs to the console only. Fails if the file cannot be
/// opened or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if config.file.is_empty() {
        return try_init_console(&config.level);
    }

    let log_file = open_log_file(Path::new(&config.file))?;
    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| IndexError::Config(format!("failed to initialize logging: {e}")))
}

fn try_init_console(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .try_init()
        .map_err(|e| IndexError::Config(format!("failed to initialize logging: {e}")))
}

/// Initialize console-only logging, the fallback when [`init`] fails.
///
/// Does nothing if a subscriber is already installed.
pub fn init_console_only(level: &str) {
    if let Err(e) = try_init_console(level) {
        eprintln!("{e}");
    }
}
