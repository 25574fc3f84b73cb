//! Domain model for one clinic day of scheduled work.
//!
//! # Responsibility
//! - Define the task shape the conflict detector and renderers share.
//! - Keep conflict annotations separate from a task's own identity.
//!
//! # Invariants
//! - Every task is identified by a stable, non-empty `TaskId`.
//! - Conflicts are derived per computation and never stored on `Task`.

pub mod conflict;
pub mod patient;
pub mod task;
