//! Core of the taskman task tracker.
//! Owns the task model, the JSON-file store and its queries.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod store;

pub use config::{AppConfig, ConfigError, LoggingConfig, StoreConfig, DEFAULT_STORAGE_FILE};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskStatus, TaskUpdate};
pub use search::keyword::{search_tasks, KeywordQuery};
pub use store::task_store::TaskStore;
pub use store::{StoreError, StoreResult};
