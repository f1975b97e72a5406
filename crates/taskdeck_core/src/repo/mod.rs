//! Persistence contracts for the task collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract and its SQLite
//!   key-value implementation.
//!
//! # Invariants
//! - No incremental diffing: every save rewrites the full collection.

pub mod task_repo;
