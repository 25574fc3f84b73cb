//! Agenda filtering over annotated tasks.
//!
//! Filtering runs after detection, so a task hidden by the filter still
//! contributes conflicts to the visible ones.

use crate::model::conflict::ScheduledTask;
use crate::model::task::StaffRole;

/// Role and free-text filter for the agenda list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaFilter {
    /// Keep only tasks assigned to this role.
    pub role: Option<StaffRole>,
    /// Case-insensitive substring over task title or patient name.
    pub search: Option<String>,
}

impl AgendaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: StaffRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether one task passes the filter.
    pub fn matches(&self, task: &ScheduledTask) -> bool {
        if let Some(role) = self.role {
            if task.task.assigned_to != role {
                return false;
            }
        }

        match self.normalized_search() {
            Some(needle) => {
                task.task.title.to_lowercase().contains(&needle)
                    || task.task.patient_name.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Tasks passing the filter, in input order.
    pub fn apply<'a>(&self, tasks: &'a [ScheduledTask]) -> Vec<&'a ScheduledTask> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::AgendaFilter;
    use crate::model::conflict::ScheduledTask;
    use crate::model::task::{StaffRole, Task};
    use chrono::{TimeZone, Utc};

    fn scheduled(id: &str, title: &str, patient: &str, role: StaffRole) -> ScheduledTask {
        let due = Utc.with_ymd_and_hms(2024, 7, 22, 9, 0, 0).unwrap();
        ScheduledTask::unflagged(
            Task::with_id(id, title, due, 30, role)
                .unwrap()
                .for_patient(format!("p-{id}"), patient),
        )
    }

    #[test]
    fn blank_search_keeps_everything() {
        let tasks = vec![
            scheduled("a", "Follicle Scan #1", "Jane Doe", StaffRole::Nurse),
            scheduled("b", "OPU", "Emily Smith", StaffRole::Doctor),
        ];
        assert_eq!(AgendaFilter::new().with_search("   ").apply(&tasks).len(), 2);
    }

    #[test]
    fn role_and_search_combine() {
        let tasks = vec![
            scheduled("a", "Follicle Scan #1", "Jane Doe", StaffRole::Nurse),
            scheduled("b", "Follicle Scan #2", "Emily Smith", StaffRole::Doctor),
            scheduled("c", "hCG Blood Test", "Jane Doe", StaffRole::Nurse),
        ];

        let filter = AgendaFilter::new()
            .with_role(StaffRole::Nurse)
            .with_search("SCAN");
        let ids: Vec<&str> = filter
            .apply(&tasks)
            .iter()
            .map(|task| task.task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);

        let by_patient = AgendaFilter::new().with_search("jane");
        assert_eq!(by_patient.apply(&tasks).len(), 2);
    }
}
