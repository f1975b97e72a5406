//! Local reminder scheduling and near-due detection.
//!
//! # Responsibility
//! - Plan at most one reminder per task against a platform notification
//!   backend.
//! - Flag tasks whose due date-time falls within the next 24 hours.
//!
//! # Invariants
//! - Permission denial disables scheduling but never blocks task CRUD.
//! - Backend failures are logged and swallowed, never propagated.

pub mod reminder;
