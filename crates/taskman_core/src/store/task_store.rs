//! Task store over a single JSON backing file.
//!
//! # Responsibility
//! - Load the full task list once at construction.
//! - Issue ids, apply mutations and rewrite the backing file.
//! - Answer list/search queries from memory.
//!
//! # Invariants
//! - Ids are positive and unique.
//! - Ids issued or loaded by this instance are never issued again, even
//!   after the task holding them is deleted.
//! - Every mutation is staged, written, then committed.

use super::file::{read_tasks, write_tasks};
use super::{StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::task::{NewTask, Task, TaskId, TaskStatus, TaskUpdate};
use crate::search::keyword::search_tasks;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// In-memory task collection backed by a JSON file.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    /// Largest id loaded or issued so far.
    high_water: TaskId,
}

impl TaskStore {
    /// Opens the store at the configured backing file.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::load(config.path.clone())
    }

    /// Loads the store from `path`.
    ///
    /// A missing file starts an empty store. A present but malformed file
    /// fails with [`StoreError::Corrupt`] and is left as is.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tasks = match read_tasks(&path) {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                return Err(err);
            }
        };
        let high_water = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        info!(
            "event=store_load module=store status=ok path={} count={}",
            path.display(),
            tasks.len()
        );

        Ok(Self {
            path,
            tasks,
            high_water,
        })
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a new incomplete task and persists.
    ///
    /// Field values are stored as given.
    pub fn add(&mut self, new_task: NewTask) -> StoreResult<TaskId> {
        let id = self.next_id();
        let mut staged = self.tasks.clone();
        staged.push(Task::from_new(id, new_task));
        self.commit(staged, "task_add")?;
        self.high_water = id;
        info!("event=task_add module=store status=ok id={id}");
        Ok(id)
    }

    /// Lists tasks, optionally restricted to one exact category.
    ///
    /// `None` or an empty category lists everything.
    pub fn list(&self, category: Option<&str>) -> Vec<&Task> {
        match category.filter(|category| !category.is_empty()) {
            Some(category) => self
                .tasks
                .iter()
                .filter(|task| task.category == category)
                .collect(),
            None => self.tasks.iter().collect(),
        }
    }

    /// Overwrites every non-empty field of `update` on task `id` and persists.
    ///
    /// An update with only blank values leaves the backing file untouched.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] when no task has `id`; nothing changes.
    pub fn edit(&mut self, id: TaskId, update: &TaskUpdate) -> StoreResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            warn!("event=task_edit module=store status=error error_code=not_found id={id}");
            return Err(StoreError::NotFound(id));
        };

        if update.is_empty() {
            info!("event=task_edit module=store status=ok id={id} changed=false");
            return Ok(());
        }

        let mut staged = self.tasks.clone();
        staged[index].apply(update);
        self.commit(staged, "task_edit")?;
        info!("event=task_edit module=store status=ok id={id}");
        Ok(())
    }

    /// Marks task `id` as complete. Other fields are untouched.
    pub fn mark_completed(&mut self, id: TaskId) -> StoreResult<()> {
        self.edit(id, &TaskUpdate::status(TaskStatus::Complete))
    }

    /// Deletes by id, or else by category.
    ///
    /// Returns the number of removed tasks. An unknown id removes nothing and
    /// is not an error. The file is rewritten only when something was removed.
    ///
    /// # Errors
    /// - [`StoreError::MissingDeleteTarget`] when neither an id nor a
    ///   non-empty category is given.
    pub fn delete(&mut self, id: Option<TaskId>, category: Option<&str>) -> StoreResult<usize> {
        let category = category.filter(|category| !category.is_empty());
        let staged: Vec<Task> = match (id, category) {
            (Some(id), _) => self
                .tasks
                .iter()
                .filter(|task| task.id != id)
                .cloned()
                .collect(),
            (None, Some(category)) => self
                .tasks
                .iter()
                .filter(|task| task.category != category)
                .cloned()
                .collect(),
            (None, None) => {
                warn!(
                    "event=task_delete module=store status=error error_code=missing_delete_target"
                );
                return Err(StoreError::MissingDeleteTarget);
            }
        };

        let removed = self.tasks.len() - staged.len();
        if removed > 0 {
            self.commit(staged, "task_delete")?;
        }
        info!(
            "event=task_delete module=store status=ok by={} removed={removed}",
            if id.is_some() { "id" } else { "category" }
        );
        Ok(removed)
    }

    /// Tasks whose title or description contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        search_tasks(&self.tasks, keyword)
    }

    /// Rewrites the backing file with the current collection.
    pub fn save(&self) -> StoreResult<()> {
        write_tasks(&self.path, &self.tasks)
    }

    fn next_id(&self) -> TaskId {
        let current_max = self.tasks.iter().map(|task| task.id).max().unwrap_or(0);
        current_max.max(self.high_water) + 1
    }

    fn commit(&mut self, staged: Vec<Task>, event: &str) -> StoreResult<()> {
        if let Err(err) = write_tasks(&self.path, &staged) {
            error!(
                "event={event} module=store status=error error_code={} error={}",
                err.code(),
                err
            );
            return Err(err);
        }
        self.tasks = staged;
        Ok(())
    }
}
