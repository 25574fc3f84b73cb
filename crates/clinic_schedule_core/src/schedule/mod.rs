//! Day scheduling pipeline.
//!
//! # Responsibility
//! - Select one calendar day of tasks and validate them at the boundary.
//! - Detect person and resource double-bookings within that day.
//! - Derive renderer views (agenda filter, timeline lanes, patient colours).
//!
//! # Invariants
//! - Detection is pure: inputs are never mutated, output order follows input.
//! - Intervals are half-open; touching tasks never conflict.

pub mod agenda;
pub mod conflict;
pub mod day;
pub mod palette;
pub mod sweep;
pub mod timeline;
