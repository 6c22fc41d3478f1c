//! Task domain model.
//!
//! # Responsibility
//! - Define the task record persisted in the backing file.
//! - Define the input shapes accepted by store mutations.
//!
//! # Invariants
//! - Every task is identified by a positive `TaskId` issued by the store.
//! - Text fields are stored as given; the store never re-validates them.

pub mod task;
