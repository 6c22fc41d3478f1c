//! File logging bootstrap.
//!
//! # Responsibility
//! - Start a rotating file logger at most once per process.
//! - Route panics into the log with a sanitized payload.
//!
//! # Invariants
//! - Repeating initialization with the same level and directory is a no-op.
//! - Re-initialization with a different level or directory is rejected.
//! - Log events carry ids and counts only, never task text.

use crate::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "taskman";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(String),
    /// Logging is already running with a different level or directory.
    Conflict {
        active_level: &'static str,
        active_dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "failed to create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict {
                active_level,
                active_dir,
            } => write!(
                f,
                "logging already running at `{}` with level `{active_level}`",
                active_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Starts file logging when `config.dir` is set.
///
/// Returns `Ok(false)` when file logging is disabled.
pub fn init_from_config(config: &LoggingConfig) -> Result<bool, LoggingError> {
    match &config.dir {
        Some(dir) => init_logging(&config.level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Starts rotating file logging into `dir` at `level`.
///
/// # Errors
/// - Unknown level, relative directory, or directory creation failure.
/// - Backend startup failure.
/// - [`LoggingError::Conflict`] when already running with other settings.
pub fn init_logging(level: &str, dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    if !dir.is_absolute() {
        return Err(LoggingError::RelativeDir(dir.to_path_buf()));
    }

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(level, dir))?;
    if active.level != level || active.dir != dir {
        return Err(LoggingError::Conflict {
            active_level: active.level,
            active_dir: active.dir.clone(),
        });
    }
    Ok(())
}

/// Active `(level, dir)` pair, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=logging status=ok level={level} dir={} version={}",
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error location={location} payload={}",
            single_line(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous(info);
    }));
}

/// Flattens `value` to one line and caps it at `max_chars` characters.
fn single_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut capped: String = flat.chars().take(max_chars).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level, single_line, LoggingError};
    use std::path::Path;

    #[test]
    fn normalize_level_accepts_aliases() {
        assert_eq!(normalize_level(" WARNING ").expect("alias should parse"), "warn");
        assert!(matches!(
            normalize_level("loud"),
            Err(LoggingError::UnsupportedLevel(level)) if level == "loud"
        ));
    }

    #[test]
    fn relative_dir_is_rejected() {
        let err = init_logging("info", Path::new("logs")).expect_err("relative dir must fail");
        assert!(matches!(err, LoggingError::RelativeDir(_)));
    }

    #[test]
    fn single_line_flattens_and_caps() {
        assert_eq!(single_line("a\nb", 10), "a b");
        assert_eq!(single_line("abcdef", 3), "abc...");
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let log_dir = dir.path().join("logs");

        init_logging("info", &log_dir).expect("first init should succeed");
        init_logging("INFO", &log_dir).expect("same settings should be a no-op");

        let err = init_logging("debug", &log_dir).expect_err("level change must fail");
        assert!(matches!(err, LoggingError::Conflict { .. }));
        let other_dir = dir.path().join("other");
        let err = init_logging("info", &other_dir).expect_err("dir change must fail");
        assert!(matches!(err, LoggingError::Conflict { .. }));

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, log_dir);
    }
}
