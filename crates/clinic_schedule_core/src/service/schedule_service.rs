//! Day schedule use-case service.
//!
//! # Responsibility
//! - Load patients, flatten pathways, select one day and detect conflicts.
//! - Hand renderers a `DaySchedule` with agenda and timeline views.
//!
//! # Invariants
//! - Every call recomputes from the repository; no conflict state is cached
//!   between calls.
//! - The service never writes to the repository.

use crate::config::{ConfigError, ScheduleConfig};
use crate::model::conflict::ScheduledTask;
use crate::model::patient::{flatten_tasks, Patient};
use crate::model::task::PatientId;
use crate::repo::patient_repo::{PatientRepository, RepoError};
use crate::schedule::agenda::AgendaFilter;
use crate::schedule::conflict::detect_with;
use crate::schedule::day::{select_day, RejectedTask};
use crate::schedule::palette::{display_color, patient_color_map};
use crate::schedule::timeline::{build_lanes, TimelineLane};
use chrono::{FixedOffset, NaiveDate};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for day schedule use-cases.
#[derive(Debug)]
pub enum ScheduleServiceError {
    Config(ConfigError),
    Repo(RepoError),
}

impl Display for ScheduleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ScheduleServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for ScheduleServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One computed clinic day.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub day: NaiveDate,
    /// Valid tasks of the day, sorted by start, with conflict annotations.
    pub tasks: Vec<ScheduledTask>,
    /// Tasks of the day excluded by boundary validation.
    pub rejected: Vec<RejectedTask>,
    pub patient_colors: BTreeMap<PatientId, String>,
    config: ScheduleConfig,
}

impl DaySchedule {
    /// Agenda list view after role/search filtering.
    pub fn agenda(&self, filter: &AgendaFilter) -> Vec<&ScheduledTask> {
        filter.apply(&self.tasks)
    }

    /// Tasks flagged with at least one conflict.
    pub fn conflicted(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(|task| task.has_conflict())
    }

    /// Resource timeline view over the configured lanes and window.
    pub fn timeline(&self) -> Vec<TimelineLane> {
        build_lanes(
            &self.tasks,
            &self.config.lanes,
            &self.config.day_window,
            self.config.offset(),
            &self.patient_colors,
        )
    }

    /// Timeline view restricted to tasks passing `filter`.
    pub fn filtered_timeline(&self, filter: &AgendaFilter) -> Vec<TimelineLane> {
        let visible: Vec<ScheduledTask> = self.agenda(filter).into_iter().cloned().collect();
        build_lanes(
            &visible,
            &self.config.lanes,
            &self.config.day_window,
            self.config.offset(),
            &self.patient_colors,
        )
    }

    /// Clinic-local offset the day was selected in.
    pub fn offset(&self) -> FixedOffset {
        self.config.offset()
    }

    /// Display colour for one task of this day.
    pub fn color_of(&self, task: &ScheduledTask) -> &str {
        display_color(task, &self.patient_colors)
    }
}

/// Use-case service computing day schedules from a patient repository.
pub struct ScheduleService<R: PatientRepository> {
    repo: R,
    config: ScheduleConfig,
}

impl<R: PatientRepository> ScheduleService<R> {
    /// Creates a service after validating `config`.
    pub fn new(repo: R, config: ScheduleConfig) -> Result<Self, ScheduleServiceError> {
        config.validate()?;
        Ok(Self { repo, config })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Computes the schedule for `day` from the repository's current data.
    pub fn day_schedule(&self, day: NaiveDate) -> Result<DaySchedule, ScheduleServiceError> {
        let patients = self.repo.list_patients()?;
        Ok(self.compute(&patients, day))
    }

    /// Computes the schedule for `day` from already loaded patients.
    pub fn compute(&self, patients: &[Patient], day: NaiveDate) -> DaySchedule {
        let selection = select_day(flatten_tasks(patients), day, self.config.offset());
        let tasks = detect_with(self.config.strategy, &selection.tasks);
        let patient_colors = patient_color_map(patients, &self.config.patient_palette);

        info!(
            "event=day_schedule module=service status=ok day={} patients={} tasks={} conflicted={} rejected={}",
            day,
            patients.len(),
            tasks.len(),
            tasks.iter().filter(|task| task.has_conflict()).count(),
            selection.rejected.len()
        );

        DaySchedule {
            day,
            tasks,
            rejected: selection.rejected,
            patient_colors,
            config: self.config.clone(),
        }
    }
}
