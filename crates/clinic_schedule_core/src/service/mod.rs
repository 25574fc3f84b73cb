//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads and the scheduling pipeline into
//!   use-case level APIs.
//! - Keep UI/CLI layers decoupled from data loading details.

pub mod schedule_service;
