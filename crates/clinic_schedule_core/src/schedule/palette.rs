//! Per-patient display colours.
//!
//! Colours are assigned by patient position and do not depend on conflict
//! status; renderers switch to [`CONFLICT_COLOR`] for flagged tasks.

use crate::model::conflict::ScheduledTask;
use crate::model::patient::Patient;
use crate::model::task::PatientId;
use std::collections::BTreeMap;

/// Highlight colour for tasks involved in a double-booking (amber-500).
pub const CONFLICT_COLOR: &str = "#F59E0B";

/// Colour for tasks whose patient has no palette entry (slate-500).
pub const FALLBACK_COLOR: &str = "#64748B";

/// Default patient palette: blue, teal, indigo, pink, sky, orange.
pub const DEFAULT_PATIENT_PALETTE: [&str; 6] = [
    "#3B82F6", "#14B8A6", "#6366F1", "#EC4899", "#0EA5E9", "#F97316",
];

/// Returns the default palette as owned strings.
pub fn default_palette() -> Vec<String> {
    DEFAULT_PATIENT_PALETTE
        .iter()
        .map(|color| color.to_string())
        .collect()
}

/// Maps each patient to `palette[index % palette.len()]`.
///
/// Returns an empty map for an empty palette.
pub fn patient_color_map(patients: &[Patient], palette: &[String]) -> BTreeMap<PatientId, String> {
    if palette.is_empty() {
        return BTreeMap::new();
    }

    patients
        .iter()
        .enumerate()
        .map(|(index, patient)| (patient.id.clone(), palette[index % palette.len()].clone()))
        .collect()
}

/// Colour a renderer should use for one annotated task.
pub fn display_color<'a>(task: &ScheduledTask, colors: &'a BTreeMap<PatientId, String>) -> &'a str {
    if task.has_conflict() {
        return CONFLICT_COLOR;
    }
    patient_color(&task.task.patient_id, colors)
}

/// Patient colour ignoring conflict status.
pub fn patient_color<'a>(patient_id: &str, colors: &'a BTreeMap<PatientId, String>) -> &'a str {
    colors
        .get(patient_id)
        .map(String::as_str)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::{default_palette, patient_color_map, FALLBACK_COLOR};
    use crate::model::patient::Patient;

    fn patient(id: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: format!("Patient {id}"),
            age: 34,
            pathway: Vec::new(),
        }
    }

    #[test]
    fn palette_wraps_around() {
        let patients: Vec<Patient> = (0..8).map(|i| patient(&format!("p{i}"))).collect();
        let palette = default_palette();
        let colors = patient_color_map(&patients, &palette);

        assert_eq!(colors["p0"], "#3B82F6");
        assert_eq!(colors["p5"], "#F97316");
        assert_eq!(colors["p6"], colors["p0"]);
        assert_eq!(colors["p7"], colors["p1"]);
    }

    #[test]
    fn empty_palette_yields_fallback() {
        let colors = patient_color_map(&[patient("p0")], &[]);
        assert!(colors.is_empty());
        assert_eq!(super::patient_color("p0", &colors), FALLBACK_COLOR);
    }
}
