//! Pairwise conflict detector.
//!
//! # Responsibility
//! - Compare every unordered pair of a day's tasks for time overlap.
//! - Flag both sides of a pair sharing an assignee (`person`) or an
//!   exclusive resource (`resource`).
//!
//! # Invariants
//! - A task is never compared with itself.
//! - The relation is symmetric: each side names the other's patient.
//! - Every conflict found is kept; none overwrite another.
//! - Output order equals input order and the input is left untouched.

use crate::model::conflict::{Conflict, ScheduledTask};
use crate::model::task::{Task, TaskInterval};
use crate::schedule::sweep::detect_conflicts_sweep;
use log::debug;
use serde::{Deserialize, Serialize};

/// Detection algorithm choice. Both produce identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// O(n²) scan of every pair; fine for a clinic day of tens of tasks.
    #[default]
    Pairwise,
    /// Sort by start and compare only with still-active intervals.
    SweepLine,
}

impl ConflictStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pairwise => "pairwise",
            Self::SweepLine => "sweep_line",
        }
    }
}

/// Runs the detector selected by `strategy`.
pub fn detect_with(strategy: ConflictStrategy, tasks: &[Task]) -> Vec<ScheduledTask> {
    match strategy {
        ConflictStrategy::Pairwise => detect_conflicts(tasks),
        ConflictStrategy::SweepLine => detect_conflicts_sweep(tasks),
    }
}

/// Annotates one day's tasks with every person/resource double-booking.
///
/// Input order does not affect which tasks are flagged; it only decides the
/// order of each task's `conflicts` list (by partner position).
pub fn detect_conflicts(tasks: &[Task]) -> Vec<ScheduledTask> {
    let intervals: Vec<TaskInterval> = tasks.iter().map(Task::interval).collect();
    let mut found = ConflictSlots::new(tasks.len());

    for i in 0..tasks.len() {
        for j in (i + 1)..tasks.len() {
            if intervals[i].overlaps(&intervals[j]) {
                found.record_pair(tasks, i, j);
            }
        }
    }

    let annotated = found.into_scheduled(tasks);
    log_detection(ConflictStrategy::Pairwise, &annotated);
    annotated
}

/// Per-task conflict accumulator shared by both detector strategies.
pub(crate) struct ConflictSlots {
    slots: Vec<Vec<(usize, Conflict)>>,
}

impl ConflictSlots {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![Vec::new(); len],
        }
    }

    /// Records the conflicts of an overlapping pair on both sides.
    ///
    /// Caller guarantees `i != j` and that the two intervals overlap.
    /// Blank resource ids count as no resource.
    pub(crate) fn record_pair(&mut self, tasks: &[Task], i: usize, j: usize) {
        let (a, b) = (&tasks[i], &tasks[j]);

        if a.assigned_to == b.assigned_to {
            self.slots[i].push((j, Conflict::person(a, b)));
            self.slots[j].push((i, Conflict::person(b, a)));
        }

        let resource_a = a.resource_required.as_deref().filter(|r| !r.trim().is_empty());
        let resource_b = b.resource_required.as_deref().filter(|r| !r.trim().is_empty());
        if let (Some(resource_a), Some(resource_b)) = (resource_a, resource_b) {
            if resource_a == resource_b {
                self.slots[i].push((j, Conflict::resource(resource_a, b)));
                self.slots[j].push((i, Conflict::resource(resource_b, a)));
            }
        }
    }

    /// Builds the annotated output, ordering each task's conflicts by
    /// partner position. The sort is stable so person stays before resource.
    pub(crate) fn into_scheduled(self, tasks: &[Task]) -> Vec<ScheduledTask> {
        tasks
            .iter()
            .zip(self.slots)
            .map(|(task, mut slot)| {
                slot.sort_by_key(|(partner, _)| *partner);
                ScheduledTask {
                    task: task.clone(),
                    conflicts: slot.into_iter().map(|(_, conflict)| conflict).collect(),
                }
            })
            .collect()
    }
}

pub(crate) fn log_detection(strategy: ConflictStrategy, annotated: &[ScheduledTask]) {
    let conflicted = annotated.iter().filter(|task| task.has_conflict()).count();
    debug!(
        "event=conflicts_detected module=schedule strategy={} tasks={} conflicted={}",
        strategy.as_str(),
        annotated.len(),
        conflicted
    );
}
