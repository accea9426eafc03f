//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! User-editable settings stored as TOML in the platform config directory
//! (resolved with the [`directories`](https://docs.rs/directories) crate).
//! A missing file is created with defaults on first load.
//!
//! ```toml
//! [api]
//! base_url = "https://localhost:44321/api/Employees"
//! request_timeout = "10s"
//!
//! [list]
//! page_size = 5
//!
//! [logging]
//! level = "info"
//! dir = "logs"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::pager::DEFAULT_PAGE_SIZE;

pub const DEFAULT_BASE_URL: &str = "https://localhost:44321/api/Employees";

/// Backend endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Collection endpoint; items live at `{base_url}/{id}`.
    pub base_url: String,

    /// Per-request timeout. Unset means requests wait indefinitely.
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub dir: PathBuf,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            format: LogFormat::Json,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, writing defaults if the
    /// file does not exist yet.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        if TokioFs::try_exists(&path).await.unwrap_or(false) {
            info!("Loading config from {}", path.display());
            Self::load_from(&path).await
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );
            let default_config = Self::default();
            default_config.save_to(&path).await?;
            Ok(default_config)
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|source| AppError::config_io(path, source))?;
        let cfg: Self = toml::from_str(&text)?;
        Ok(cfg.sanitized())
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        let io_err = |source| AppError::config_io(path, source);
        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str).await.map_err(io_err)?;
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("org", "staffdesk", "StaffDesk")
            .ok_or(AppError::ConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    fn sanitized(mut self) -> Self {
        if self.list.page_size == 0 {
            warn!(
                default = DEFAULT_PAGE_SIZE,
                "page_size of 0 is invalid, using default"
            );
            self.list.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }
}
