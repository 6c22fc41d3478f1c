//! JSON-file task store.
//!
//! # Responsibility
//! - Own the authoritative, insertion-ordered task collection.
//! - Keep the backing file in sync after every successful mutation.
//!
//! # Invariants
//! - Mutations either persist and commit, or leave memory untouched.
//! - A malformed backing file is reported, never silently replaced.

use crate::model::task::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for task operations and persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Edit or mark-complete targeted an id that is not in the store.
    NotFound(TaskId),
    /// Delete was called with neither an id nor a category.
    MissingDeleteTarget,
    /// Reading or writing the backing file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file exists but does not hold a valid task list.
    Corrupt { path: PathBuf, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::MissingDeleteTarget => {
                write!(f, "specify a task id or a category to delete")
            }
            Self::Io { path, source } => {
                write!(f, "task file `{}` is not accessible: {source}", path.display())
            }
            Self::Corrupt { path, message } => {
                write!(f, "task file `{}` is malformed: {message}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::MissingDeleteTarget | Self::Corrupt { .. } => None,
        }
    }
}

impl StoreError {
    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MissingDeleteTarget => "missing_delete_target",
            Self::Io { .. } => "io",
            Self::Corrupt { .. } => "corrupt",
        }
    }
}
