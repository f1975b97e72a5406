//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record used by every other layer.
//! - Provide draft/patch shapes for the create and merge-edit flows.
//!
//! # Invariants
//! - `TaskId` is unique within one store and never reused.
//! - A blank title is rejected before any record reaches persistence.

pub mod task;
