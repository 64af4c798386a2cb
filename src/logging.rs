//! Log file setup using tracing
//!
//! The log file is append-only and records every user-facing message with a
//! local timestamp. It is never read back.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log file name, created in the process working directory
pub const DEFAULT_LOG_FILE: &str = "office_tweaks.log";

/// Environment variable holding an EnvFilter directive
pub const LOG_FILTER_ENV: &str = "OFFICE_TWEAKS_LOG";

/// Install the global subscriber: file layer always, stderr layer with `verbose`.
///
/// Returns the absolute path of the log file. Must be called once, before any
/// component emits events.
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<PathBuf> {
    let log_file = if log_file.is_absolute() {
        log_file.to_path_buf()
    } else {
        env::current_dir()
            .context("Failed to read the process working directory")?
            .join(log_file)
    };

    let directory = log_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", log_file.display()))?;
    fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory: {}", directory.display()))?;

    // Written synchronously so an interrupt-driven exit never drops lines
    let file_appender = tracing_appender::rolling::never(&directory, file_name);

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string());

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_timer(timer)
                .with_target(false)
                .with_ansi(false),
        )
        .with(stderr_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Office Tweaks started");

    Ok(log_file)
}
