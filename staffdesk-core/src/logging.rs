//! src/logging.rs
//! Tracing setup: a daily rolling log file behind a non-blocking writer.
//! The terminal belongs to the TUI, so nothing is written to stdout/stderr.

use std::path::{Component, Path};

use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

const LOG_FILE_PREFIX: &str = "staffdesk";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },
}

pub struct Logger;

impl Logger {
    /// Installs the global subscriber. The returned guard flushes buffered
    /// lines on drop and must be held until shutdown.
    pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
        validate_log_directory(&config.dir)?;
        std::fs::create_dir_all(&config.dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(MAX_LOG_FILES)
            .build(&config.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(file_layer)
            .with(make_filter(&config.level)?)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        info!(
            dir = %config.dir.display(),
            format = ?config.format,
            "Logging initialized"
        );
        Ok(guard)
    }
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn make_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

fn validate_log_directory(path: &Path) -> Result<(), LoggingError> {
    if path.components().count() == 0 {
        return Err(LoggingError::InvalidLogDirectory("Empty path".to_string()));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(LoggingError::InvalidLogDirectory(
            "Path contains parent directory references".to_string(),
        ));
    }

    Ok(())
}
