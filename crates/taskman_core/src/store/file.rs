//! Backing file codec.
//!
//! The file is a pretty-printed JSON array with 4-space indentation. Text is
//! written as UTF-8 without `\u` escaping.

use super::{StoreError, StoreResult};
use crate::model::task::Task;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Reads every task from `path`.
///
/// A missing file yields an empty list.
pub(super) fn read_tasks(path: &Path) -> StoreResult<Vec<Task>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|err| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    check_ids(path, &tasks)?;
    Ok(tasks)
}

/// Overwrites `path` with the full task list.
pub(super) fn write_tasks(path: &Path, tasks: &[Task]) -> StoreResult<()> {
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    tasks
        .serialize(&mut serializer)
        .map_err(|err| io_error(err.into()))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, buffer).map_err(io_error)
}

fn check_ids(path: &Path, tasks: &[Task]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id == 0 {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                message: "task id must be positive, got 0".to_string(),
            });
        }
        if !seen.insert(task.id) {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                message: format!("duplicate task id {}", task.id),
            });
        }
    }
    Ok(())
}
