//! Process configuration.
//!
//! # Responsibility
//! - Carry the backing file location and logging options as explicit values.
//! - Read overrides from `TASKMAN_*` environment variables.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set-but-blank variables are errors.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Default backing file, relative to the working directory.
pub const DEFAULT_STORAGE_FILE: &str = "tasks.json";

/// Overrides the backing file path.
pub const ENV_STORAGE_FILE: &str = "TASKMAN_FILE";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "TASKMAN_LOG_LEVEL";
/// Enables file logging into this absolute directory.
pub const ENV_LOG_DIR: &str = "TASKMAN_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    /// Variable is present but empty after trimming.
    Blank(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(key) => write!(f, "environment variable `{key}` is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Task store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }
}

/// Logging settings. File logging is off when `dir` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Builds configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Blank(key)),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_STORAGE_FILE)? {
            config.store.path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL)? {
            config.logging.level = level;
        }
        config.logging.dir = read(ENV_LOG_DIR)?.map(PathBuf::from);
        Ok(config)
    }
}
