//! Process-wide logging: every event goes both to stderr and to a log file.
//!
//! Readers never log. The binary calls [`init`] once at startup; the
//! subscriber stays installed until the process exits.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Filter enabling this crate's events at the configured level.
pub fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!("stareso={}", config.level.as_str().to_lowercase()))
}

/// Builds the subscriber without installing it. `RUST_LOG`, when set,
/// replaces the configured level.
pub fn subscriber(config: &LoggingConfig) -> io::Result<impl Subscriber + Send + Sync + use<>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(config));
    with_filter(config, filter)
}

/// Builds the subscriber with an explicit filter, ignoring the environment.
pub fn with_filter(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> io::Result<impl Subscriber + Send + Sync + use<>> {
    let file_layer = match &config.file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr),
        )
        .with(file_layer))
}

/// Installs the process-wide subscriber.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    subscriber(config)?
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}
