//! Data source seam for patient pathways.
//!
//! # Responsibility
//! - Define the read-only contract the schedule service loads patients from.
//! - Provide a snapshot implementation for files and tests.
//!
//! # Invariants
//! - Repositories return semantic errors (`DuplicatePatientId`) in addition
//!   to transport errors.

pub mod patient_repo;
