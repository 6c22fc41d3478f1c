//! Task search entry points.
//!
//! # Responsibility
//! - Provide keyword matching over task text fields.
//!
//! # Invariants
//! - Search is read-only and preserves store order.

pub mod keyword;
