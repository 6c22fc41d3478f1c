//! Task record and its closed value sets.
//!
//! # Responsibility
//! - Define the flat task shape stored as one JSON object per task.
//! - Map priority/status labels to and from their on-disk strings.
//!
//! # Invariants
//! - Serialized keys are exactly `id,title,description,category,due_date,priority,status`.
//! - Unknown keys are rejected on read.
//! - Labels written by older localized builds are accepted on read but
//!   always written back in the canonical English form.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-issued task identifier. Always positive.
pub type TaskId = u64;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "Низкий")]
    Low,
    #[serde(alias = "Средний")]
    Medium,
    #[serde(alias = "Высокий")]
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Canonical label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses a user-facing label.
    ///
    /// Matching ignores surrounding whitespace and case, and accepts the
    /// localized labels too. Returns `None` for anything else.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" | "низкий" => Some(Self::Low),
            "medium" | "средний" => Some(Self::Medium),
            "high" | "высокий" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "Не выполнена")]
    Incomplete,
    #[serde(alias = "Выполнена")]
    Complete,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "Incomplete",
            Self::Complete => "Complete",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored task.
///
/// Field order here is the key order of the serialized object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`. Format is checked by callers.
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl Task {
    /// Builds a fresh task from creation input. Status starts as `Incomplete`.
    pub fn from_new(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            category: new_task.category,
            due_date: new_task.due_date,
            priority: new_task.priority,
            status: TaskStatus::Incomplete,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    /// Applies every non-empty field of `update`.
    ///
    /// Blank text values leave the corresponding field unchanged.
    pub fn apply(&mut self, update: &TaskUpdate) {
        replace_if_present(&mut self.title, update.title.as_deref());
        replace_if_present(&mut self.description, update.description.as_deref());
        replace_if_present(&mut self.category, update.category.as_deref());
        replace_if_present(&mut self.due_date, update.due_date.as_deref());
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Console line form: `id. title - category - due_date - priority - status`.
impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {} - {} - {} - {} - {}",
            self.id, self.title, self.category, self.due_date, self.priority, self.status
        )
    }
}

/// Creation input for [`crate::TaskStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
    pub priority: Priority,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            due_date: due_date.into(),
            priority,
        }
    }
}

/// Field replacements for [`crate::TaskStore::edit`].
///
/// `None` and empty strings both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Update that only flips the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns whether applying this update could change any field.
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.category,
            &self.due_date,
        ]
        .iter()
        .all(|value| value.as_deref().map_or(true, str::is_empty))
            && self.priority.is_none()
            && self.status.is_none()
    }
}

fn replace_if_present(field: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        *field = value.to_string();
    }
}
