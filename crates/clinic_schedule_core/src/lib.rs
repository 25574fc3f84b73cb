//! Core scheduling logic for the clinic day dashboard.
//! This crate is the single source of truth for double-booking rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use config::{ConfigError, ScheduleConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::conflict::{Conflict, ConflictKind, ScheduledTask};
pub use model::patient::{flatten_tasks, PathwayStep, Patient};
pub use model::task::{
    parse_staff_role, PatientId, StaffRole, StaffRoleError, Task, TaskId, TaskInterval,
    TaskStatus, TaskValidationError,
};
pub use repo::patient_repo::{InMemoryPatientRepository, PatientRepository, RepoError, RepoResult};
pub use schedule::agenda::AgendaFilter;
pub use schedule::conflict::{detect_conflicts, detect_with, ConflictStrategy};
pub use schedule::day::{select_day, DaySelection, RejectedTask};
pub use schedule::palette::{
    display_color, patient_color_map, CONFLICT_COLOR, DEFAULT_PATIENT_PALETTE, FALLBACK_COLOR,
};
pub use schedule::sweep::detect_conflicts_sweep;
pub use schedule::timeline::{
    build_lanes, place, DayWindow, LaneKey, LaneSet, TimelineBlock, TimelineError, TimelineLane,
    TimelineSlot,
};
pub use service::schedule_service::{DaySchedule, ScheduleService, ScheduleServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
