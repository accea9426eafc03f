//! src/error.rs
//! ============================================================================
//! # `AppError`: failures while loading or writing the configuration
//!
//! Backend failures are [`ApiError`](crate::api::client::ApiError) and stay
//! inside the event loop; log setup has its own
//! [`LoggingError`](crate::logging::LoggingError). The binary wraps all of
//! them with `anyhow` context at startup.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No home directory to place the config under.
    #[error("Could not determine config directory")]
    ConfigDir,
}

impl AppError {
    pub fn config_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_io_names_the_path() {
        let err = AppError::config_io(
            "/etc/staffdesk/config.toml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("/etc/staffdesk/config.toml"));
        assert!(text.ends_with("denied"));
    }

    #[test]
    fn toml_errors_convert() {
        let parse = toml::from_str::<toml::Table>("[broken").unwrap_err();
        assert!(matches!(AppError::from(parse), AppError::Config(_)));
    }
}
