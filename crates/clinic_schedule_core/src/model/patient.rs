//! Patient treatment pathway as supplied by the data source.

use crate::model::task::{PatientId, Task};
use serde::{Deserialize, Serialize};

/// One step of a patient's treatment pathway (e.g. stimulation, retrieval).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayStep {
    pub step_id: String,
    pub step_name: String,
    /// Tasks of this step; patient fields may be left empty in the source.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A patient and their pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub pathway: Vec<PathwayStep>,
}

impl Patient {
    /// Flattens the pathway into tasks stamped with this patient's id and name.
    pub fn tasks(&self) -> impl Iterator<Item = Task> + '_ {
        self.pathway.iter().flat_map(move |step| {
            step.tasks.iter().map(move |task| {
                let mut task = task.clone();
                task.patient_id = self.id.clone();
                task.patient_name = self.name.clone();
                task
            })
        })
    }
}

/// Flattens every patient's pathway, in patient then step order.
pub fn flatten_tasks(patients: &[Patient]) -> Vec<Task> {
    patients.iter().flat_map(|patient| patient.tasks()).collect()
}
