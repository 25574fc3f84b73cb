//! Conflict annotations produced by the detector.
//!
//! # Invariants
//! - A conflict always names the partner task it was found against.
//! - Annotations are recomputed for every day computation; they are never
//!   the source of truth for a task's state.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Kind of double-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Same staff role booked for two overlapping tasks.
    Person,
    /// Same exclusive resource required by two overlapping tasks.
    Resource,
}

/// One detected double-booking, seen from one side of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    /// Human-readable tooltip text naming the other patient.
    pub message: String,
    /// Partner task of the pair.
    pub with_task: TaskId,
}

impl Conflict {
    /// Person conflict for `task`, found against `other`.
    pub fn person(task: &Task, other: &Task) -> Self {
        Self {
            kind: ConflictKind::Person,
            message: format!(
                "Conflict: {} is double-booked with task for {}.",
                task.assigned_to, other.patient_name
            ),
            with_task: other.id.clone(),
        }
    }

    /// Resource conflict on `resource`, found against `other`.
    pub fn resource(resource: &str, other: &Task) -> Self {
        Self {
            kind: ConflictKind::Resource,
            message: format!(
                "Conflict: Resource '{resource}' is double-booked by {}.",
                other.patient_name
            ),
            with_task: other.id.clone(),
        }
    }
}

/// A task together with every conflict found for it in one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    /// Ordered by partner position in the detector input; for one partner a
    /// person conflict precedes a resource conflict.
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
}

impl ScheduledTask {
    /// Wraps a task with no conflicts.
    pub fn unflagged(task: Task) -> Self {
        Self {
            task,
            conflicts: Vec::new(),
        }
    }

    /// Whether the task takes part in at least one double-booking.
    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Primary conflict for single-badge renderers.
    ///
    /// Precedence: first resource conflict, otherwise first person conflict.
    pub fn conflict(&self) -> Option<&Conflict> {
        self.conflicts
            .iter()
            .find(|conflict| conflict.kind == ConflictKind::Resource)
            .or_else(|| self.conflicts.first())
    }

    /// Conflicts of one kind, in detection order.
    pub fn conflicts_of(&self, kind: ConflictKind) -> impl Iterator<Item = &Conflict> {
        self.conflicts
            .iter()
            .filter(move |conflict| conflict.kind == kind)
    }
}
