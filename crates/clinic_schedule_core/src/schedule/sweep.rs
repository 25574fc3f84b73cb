//! Sweep-line conflict detector.
//!
//! Sorts intervals by start and keeps an active set of intervals that have
//! not yet ended. Each incoming interval is compared only with the active
//! set, so disjoint parts of the day cost nothing. Output is identical to
//! [`detect_conflicts`](crate::schedule::conflict::detect_conflicts).

use crate::model::conflict::ScheduledTask;
use crate::model::task::{Task, TaskInterval};
use crate::schedule::conflict::{log_detection, ConflictSlots, ConflictStrategy};

/// Annotates one day's tasks using a start-ordered sweep.
pub fn detect_conflicts_sweep(tasks: &[Task]) -> Vec<ScheduledTask> {
    let intervals: Vec<TaskInterval> = tasks.iter().map(Task::interval).collect();

    // Empty intervals overlap nothing; leave them out of the sweep entirely.
    let mut order: Vec<usize> = (0..tasks.len())
        .filter(|&index| !intervals[index].is_empty())
        .collect();
    order.sort_by_key(|&index| (intervals[index].start_ms, index));

    let mut found = ConflictSlots::new(tasks.len());
    let mut active: Vec<usize> = Vec::new();

    for incoming in order {
        let start = intervals[incoming].start_ms;
        // Half-open: an interval ending exactly at `start` is already over.
        active.retain(|&index| intervals[index].end_ms > start);

        for &other in &active {
            let (first, second) = if other < incoming {
                (other, incoming)
            } else {
                (incoming, other)
            };
            found.record_pair(tasks, first, second);
        }
        active.push(incoming);
    }

    let annotated = found.into_scheduled(tasks);
    log_detection(ConflictStrategy::SweepLine, &annotated);
    annotated
}
