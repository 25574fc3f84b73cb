//! Resource timeline layout.
//!
//! # Responsibility
//! - Place task blocks on the clinic's working-day strip as percentages.
//! - Group blocks into staff and facility lanes.
//!
//! # Invariants
//! - A task starting before the window or after its end gets no slot.
//! - Lane membership: staff lanes match `assigned_to`, facility lanes match
//!   `resource_required`; one task may appear in both kinds.

use crate::model::conflict::ScheduledTask;
use crate::model::task::{PatientId, StaffRole, Task, TaskId};
use crate::schedule::palette::display_color;
use chrono::{FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_DAY_START_HOUR: u32 = 8;
pub const DEFAULT_DAY_END_HOUR: u32 = 17;

/// Visible working-day window, in whole clinic-local hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_DAY_START_HOUR,
            end_hour: DEFAULT_DAY_END_HOUR,
        }
    }
}

impl DayWindow {
    /// Creates a validated window.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, TimelineError> {
        let window = Self {
            start_hour,
            end_hour,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.end_hour > 24 {
            return Err(TimelineError::HourOutOfRange(self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(TimelineError::EmptyWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }

    pub fn total_minutes(&self) -> u32 {
        self.end_hour
            .saturating_sub(self.start_hour)
            .saturating_mul(60)
    }
}

/// Timeline configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    HourOutOfRange(u32),
    EmptyWindow { start_hour: u32, end_hour: u32 },
}

impl Display for TimelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(hour) => write!(f, "day window hour {hour} is beyond 24"),
            Self::EmptyWindow {
                start_hour,
                end_hour,
            } => write!(
                f,
                "day window start_hour ({start_hour}) must be < end_hour ({end_hour})"
            ),
        }
    }
}

impl Error for TimelineError {}

/// Horizontal placement of one block, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineSlot {
    pub left_percent: f64,
    pub width_percent: f64,
}

/// Places a task on the window strip, or `None` when it starts outside it
/// or the window itself is invalid.
///
/// Width is not clipped; a block running past the window end overflows.
pub fn place(task: &Task, window: &DayWindow, offset: FixedOffset) -> Option<TimelineSlot> {
    window.validate().ok()?;
    let total_minutes = f64::from(window.total_minutes());

    let local = task.due_at.with_timezone(&offset);
    let start_minutes = f64::from(local.hour() * 60 + local.minute());
    let from_window_start = start_minutes - f64::from(window.start_hour * 60);

    let left_percent = from_window_start / total_minutes * 100.0;
    if !(0.0..=100.0).contains(&left_percent) {
        return None;
    }

    Some(TimelineSlot {
        left_percent,
        width_percent: task.duration_minutes as f64 / total_minutes * 100.0,
    })
}

/// Which rows the timeline shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSet {
    pub staff: Vec<StaffRole>,
    pub facilities: Vec<String>,
}

impl Default for LaneSet {
    fn default() -> Self {
        Self {
            staff: vec![StaffRole::Doctor, StaffRole::Nurse, StaffRole::Embryologist],
            facilities: vec!["OT".to_string(), "Lab".to_string()],
        }
    }
}

/// Row identity on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "name", rename_all = "snake_case")]
pub enum LaneKey {
    Staff(StaffRole),
    Facility(String),
}

impl LaneKey {
    pub fn label(&self) -> &str {
        match self {
            Self::Staff(role) => role.as_str(),
            Self::Facility(name) => name.as_str(),
        }
    }

    fn contains(&self, task: &Task) -> bool {
        match self {
            Self::Staff(role) => task.assigned_to == *role,
            Self::Facility(name) => task.resource_required.as_deref() == Some(name.as_str()),
        }
    }
}

/// One task block inside a lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBlock {
    pub task_id: TaskId,
    pub slot: TimelineSlot,
    pub color: String,
    /// Primary conflict message for the tooltip, if any.
    pub conflict_message: Option<String>,
}

/// One timeline row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLane {
    pub key: LaneKey,
    pub blocks: Vec<TimelineBlock>,
}

/// Builds staff lanes then facility lanes, in `lanes` order.
pub fn build_lanes(
    tasks: &[ScheduledTask],
    lanes: &LaneSet,
    window: &DayWindow,
    offset: FixedOffset,
    colors: &BTreeMap<PatientId, String>,
) -> Vec<TimelineLane> {
    let keys = lanes
        .staff
        .iter()
        .map(|role| LaneKey::Staff(*role))
        .chain(lanes.facilities.iter().cloned().map(LaneKey::Facility));

    keys.map(|key| {
        let blocks = tasks
            .iter()
            .filter(|scheduled| key.contains(&scheduled.task))
            .filter_map(|scheduled| {
                place(&scheduled.task, window, offset).map(|slot| TimelineBlock {
                    task_id: scheduled.task.id.clone(),
                    slot,
                    color: display_color(scheduled, colors).to_string(),
                    conflict_message: scheduled.conflict().map(|c| c.message.clone()),
                })
            })
            .collect();
        TimelineLane { key, blocks }
    })
    .collect()
}
