//! Day task selection.
//!
//! # Responsibility
//! - Narrow a task set to one calendar day in clinic-local time.
//! - Exclude invalid tasks before they can reach the detector.
//!
//! # Invariants
//! - The selected day is always supplied by the caller.
//! - Selected tasks are ordered by `due_at`, ties broken by id.

use crate::model::task::{Task, TaskId, TaskValidationError};
use chrono::{FixedOffset, NaiveDate};
use log::{debug, warn};

/// A task excluded at the selection boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTask {
    pub task_id: TaskId,
    pub error: TaskValidationError,
}

/// Valid tasks of one day plus the ones rejected on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelection {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
    pub rejected: Vec<RejectedTask>,
}

/// Selects the tasks due on `day` in the clinic's local `offset`.
///
/// Tasks on other days are skipped silently. Tasks on `day` that fail
/// [`Task::validate`] are reported in `rejected` and logged.
pub fn select_day<I>(tasks: I, day: NaiveDate, offset: FixedOffset) -> DaySelection
where
    I: IntoIterator<Item = Task>,
{
    let mut selected = Vec::new();
    let mut rejected = Vec::new();

    for task in tasks {
        if task.local_date(offset) != day {
            continue;
        }
        match task.validate() {
            Ok(()) => selected.push(task),
            Err(error) => {
                warn!(
                    "event=task_rejected module=schedule status=invalid task_id={} day={} reason={}",
                    task.id, day, error
                );
                rejected.push(RejectedTask {
                    task_id: task.id,
                    error,
                });
            }
        }
    }

    selected.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));

    debug!(
        "event=day_selected module=schedule day={} selected={} rejected={}",
        day,
        selected.len(),
        rejected.len()
    );

    DaySelection {
        day,
        tasks: selected,
        rejected,
    }
}
