//! Scheduled task model.
//!
//! # Responsibility
//! - Define the canonical task record handed to the conflict detector.
//! - Provide half-open interval math in epoch milliseconds.
//! - Validate tasks at the load/selection boundary.
//!
//! # Invariants
//! - `id` is stable across recomputations and never empty.
//! - `duration_minutes` should be `> 0`; non-positive values yield an empty
//!   interval that overlaps nothing.
//! - `resource_required` is `None` rather than a blank string.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier supplied by the pathway data source.
pub type TaskId = String;

/// Opaque patient identifier.
pub type PatientId = String;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Staff role a task is assigned to.
///
/// Serialized with the role labels used by the clinic web app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Doctor,
    Nurse,
    Embryologist,
    Counselor,
}

const ALL_STAFF_ROLES: &[StaffRole] = &[
    StaffRole::Doctor,
    StaffRole::Nurse,
    StaffRole::Embryologist,
    StaffRole::Counselor,
];

impl StaffRole {
    /// Stable display label, also used in conflict messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Nurse => "Nurse",
            Self::Embryologist => "Embryologist",
            Self::Counselor => "Counselor",
        }
    }

    /// Returns every supported role in declaration order.
    pub fn all() -> &'static [StaffRole] {
        ALL_STAFF_ROLES
    }
}

impl Display for StaffRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a staff role label, ignoring surrounding whitespace and case.
pub fn parse_staff_role(value: &str) -> Result<StaffRole, StaffRoleError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(StaffRoleError::EmptyRole);
    }

    StaffRole::all()
        .iter()
        .copied()
        .find(|role| role.as_str().eq_ignore_ascii_case(normalized))
        .ok_or_else(|| StaffRoleError::UnsupportedRole(normalized.to_string()))
}

/// Staff role parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffRoleError {
    EmptyRole,
    UnsupportedRole(String),
}

impl Display for StaffRoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "staff role must not be empty"),
            Self::UnsupportedRole(value) => write!(
                f,
                "staff role is unsupported: {value}; expected Doctor|Nurse|Embryologist|Counselor"
            ),
        }
    }
}

impl Error for StaffRoleError {}

/// Workflow state of a task. Carried for rendering only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

/// Half-open `[start_ms, end_ms)` interval in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TaskInterval {
    /// Returns whether the interval covers no instant at all.
    pub fn is_empty(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    /// Strict overlap test: intervals that only touch do not overlap.
    ///
    /// Empty intervals never overlap anything, including each other.
    pub fn overlaps(&self, other: &TaskInterval) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start_ms < other.end_ms
            && self.end_ms > other.start_ms
    }
}

/// One scheduled unit of clinical work.
///
/// Field names follow the clinic web app's JSON (`dueDate`,
/// `durationMinutes`, `assignedTo`, `resourceRequired`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    /// Absolute scheduled start.
    #[serde(rename = "dueDate")]
    pub due_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub assigned_to: StaffRole,
    /// Shared exclusive resource such as `OT` or `Lab`.
    #[serde(default)]
    pub resource_required: Option<String>,
    /// Filled from the owning patient when pathways are flattened.
    #[serde(default)]
    pub patient_id: PatientId,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates a task with a generated stable ID.
    ///
    /// Patient and resource fields start empty; see [`Task::for_patient`]
    /// and [`Task::with_resource`].
    pub fn new(
        title: impl Into<String>,
        due_at: DateTime<Utc>,
        duration_minutes: i64,
        assigned_to: StaffRole,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            due_at,
            duration_minutes,
            assigned_to,
            resource_required: None,
            patient_id: String::new(),
            patient_name: String::new(),
            status: TaskStatus::Pending,
        }
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Returns `EmptyTaskId` when `id` is blank.
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        due_at: DateTime<Utc>,
        duration_minutes: i64,
        assigned_to: StaffRole,
    ) -> Result<Self, TaskValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaskValidationError::EmptyTaskId);
        }
        let mut task = Self::new(title, due_at, duration_minutes, assigned_to);
        task.id = id;
        Ok(task)
    }

    /// Sets the owning patient.
    pub fn for_patient(
        mut self,
        patient_id: impl Into<PatientId>,
        name: impl Into<String>,
    ) -> Self {
        self.patient_id = patient_id.into();
        self.patient_name = name.into();
        self
    }

    /// Sets the exclusive resource this task occupies.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource_required = Some(resource.into());
        self
    }

    /// Half-open interval `[due_at, due_at + duration)` in epoch milliseconds.
    ///
    /// Saturates instead of overflowing for out-of-range durations.
    pub fn interval(&self) -> TaskInterval {
        let start_ms = self.due_at.timestamp_millis();
        let end_ms =
            start_ms.saturating_add(self.duration_minutes.saturating_mul(MILLIS_PER_MINUTE));
        TaskInterval { start_ms, end_ms }
    }

    /// End instant, or `None` when it is not representable.
    pub fn end_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.interval().end_ms)
    }

    /// Calendar day of `due_at` in clinic-local time.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.due_at.with_timezone(&offset).date_naive()
    }

    /// Validates invariants that must hold before conflict detection.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyTaskId);
        }
        if self.patient_id.trim().is_empty() {
            return Err(TaskValidationError::EmptyPatientId {
                task_id: self.id.clone(),
            });
        }
        if self.duration_minutes <= 0 {
            return Err(TaskValidationError::NonPositiveDuration {
                task_id: self.id.clone(),
                minutes: self.duration_minutes,
            });
        }
        if matches!(&self.resource_required, Some(resource) if resource.trim().is_empty()) {
            return Err(TaskValidationError::BlankResource {
                task_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTaskId,
    EmptyPatientId { task_id: TaskId },
    NonPositiveDuration { task_id: TaskId, minutes: i64 },
    BlankResource { task_id: TaskId },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTaskId => write!(f, "task id must not be empty"),
            Self::EmptyPatientId { task_id } => {
                write!(f, "task {task_id} has no patient id")
            }
            Self::NonPositiveDuration { task_id, minutes } => write!(
                f,
                "task {task_id} duration must be > 0 minutes, got {minutes}"
            ),
            Self::BlankResource { task_id } => write!(
                f,
                "task {task_id} has a blank resourceRequired; use null for no resource"
            ),
        }
    }
}

impl Error for TaskValidationError {}
