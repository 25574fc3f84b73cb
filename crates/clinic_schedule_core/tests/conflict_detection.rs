use chrono::{TimeZone, Utc};
use clinic_schedule_core::{
    detect_conflicts, detect_conflicts_sweep, ConflictKind, ScheduledTask, StaffRole, Task,
};

type Detector = fn(&[Task]) -> Vec<ScheduledTask>;

const DETECTORS: &[(&str, Detector)] = &[
    ("pairwise", detect_conflicts),
    ("sweep_line", detect_conflicts_sweep),
];

fn task(id: &str, hour: u32, minute: u32, minutes: i64, role: StaffRole) -> Task {
    let due = Utc.with_ymd_and_hms(2024, 7, 22, hour, minute, 0).unwrap();
    Task::with_id(id, format!("Task {id}"), due, minutes, role)
        .unwrap()
        .for_patient(format!("patient-{id}"), format!("Patient {}", id.to_uppercase()))
}

fn kinds(task: &ScheduledTask) -> Vec<ConflictKind> {
    task.conflicts.iter().map(|conflict| conflict.kind).collect()
}

fn partners(task: &ScheduledTask) -> Vec<&str> {
    task.conflicts
        .iter()
        .map(|conflict| conflict.with_task.as_str())
        .collect()
}

#[test]
fn conflicts_are_symmetric_with_swapped_messages() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 30, StaffRole::Doctor),
            task("b", 9, 15, 30, StaffRole::Doctor),
        ];
        let annotated = detect(&tasks);

        assert_eq!(partners(&annotated[0]), vec!["b"], "{name}");
        assert_eq!(partners(&annotated[1]), vec!["a"], "{name}");
        assert_eq!(
            annotated[0].conflicts[0].message,
            "Conflict: Doctor is double-booked with task for Patient B."
        );
        assert_eq!(
            annotated[1].conflicts[0].message,
            "Conflict: Doctor is double-booked with task for Patient A."
        );
    }
}

#[test]
fn lone_task_is_never_flagged() {
    for &(name, detect) in DETECTORS {
        let annotated = detect(&[task("a", 9, 0, 600, StaffRole::Nurse).with_resource("OT")]);
        assert!(!annotated[0].has_conflict(), "{name}");
    }
}

#[test]
fn back_to_back_tasks_do_not_conflict() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 30, StaffRole::Nurse).with_resource("OT"),
            task("b", 9, 30, 30, StaffRole::Nurse).with_resource("OT"),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(|t| !t.has_conflict()), "{name}");
    }
}

#[test]
fn one_minute_overlap_is_a_person_conflict() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 30, StaffRole::Nurse),
            task("b", 9, 29, 30, StaffRole::Nurse),
        ];
        let annotated = detect(&tasks);
        assert_eq!(kinds(&annotated[0]), vec![ConflictKind::Person], "{name}");
        assert_eq!(kinds(&annotated[1]), vec![ConflictKind::Person], "{name}");
    }
}

#[test]
fn contained_task_conflicts_without_resource_conflict() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 120, StaffRole::Doctor).with_resource("OT"),
            task("b", 9, 30, 15, StaffRole::Doctor).with_resource("Lab"),
        ];
        let annotated = detect(&tasks);
        assert_eq!(kinds(&annotated[0]), vec![ConflictKind::Person], "{name}");
        assert_eq!(kinds(&annotated[1]), vec![ConflictKind::Person], "{name}");
    }
}

#[test]
fn identical_intervals_conflict() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 11, 0, 45, StaffRole::Embryologist),
            task("b", 11, 0, 45, StaffRole::Embryologist),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(ScheduledTask::has_conflict), "{name}");
    }
}

#[test]
fn shared_resource_with_different_roles_is_resource_only() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 10, 0, 60, StaffRole::Doctor).with_resource("OT"),
            task("b", 10, 30, 60, StaffRole::Nurse).with_resource("OT"),
        ];
        let annotated = detect(&tasks);

        assert_eq!(kinds(&annotated[0]), vec![ConflictKind::Resource], "{name}");
        assert_eq!(kinds(&annotated[1]), vec![ConflictKind::Resource], "{name}");
        assert_eq!(
            annotated[0].conflicts[0].message,
            "Conflict: Resource 'OT' is double-booked by Patient B."
        );
    }
}

#[test]
fn tasks_without_resources_never_get_resource_conflicts() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 10, 0, 60, StaffRole::Doctor),
            task("b", 10, 30, 60, StaffRole::Nurse),
            task("c", 10, 15, 60, StaffRole::Counselor).with_resource("Lab"),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(|t| !t.has_conflict()), "{name}");
    }
}

#[test]
fn blank_resources_are_not_shared_resources() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 30, StaffRole::Doctor).with_resource(""),
            task("b", 9, 0, 30, StaffRole::Nurse).with_resource(""),
            task("c", 9, 0, 30, StaffRole::Embryologist).with_resource("  "),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(|t| !t.has_conflict()), "{name}");
    }
}

#[test]
fn disjoint_tasks_are_clean_for_any_assignment() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 30, StaffRole::Doctor).with_resource("OT"),
            task("b", 14, 0, 30, StaffRole::Doctor).with_resource("OT"),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(|t| !t.has_conflict()), "{name}");
    }
}

#[test]
fn repeated_detection_is_identical() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 60, StaffRole::Doctor).with_resource("OT"),
            task("b", 9, 30, 30, StaffRole::Doctor),
            task("c", 9, 45, 30, StaffRole::Nurse).with_resource("OT"),
        ];
        assert_eq!(detect(&tasks), detect(&tasks), "{name}");
    }
}

#[test]
fn unrelated_tasks_stay_unflagged() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 8, 0, 30, StaffRole::Nurse),
            task("b", 9, 0, 60, StaffRole::Doctor),
            task("c", 9, 30, 30, StaffRole::Doctor),
            task("d", 9, 30, 30, StaffRole::Embryologist).with_resource("Lab"),
            task("e", 13, 0, 30, StaffRole::Counselor),
        ];
        let annotated = detect(&tasks);

        let flagged: Vec<&str> = annotated
            .iter()
            .filter(|t| t.has_conflict())
            .map(|t| t.task.id.as_str())
            .collect();
        assert_eq!(flagged, vec!["b", "c"], "{name}");
    }
}

#[test]
fn non_positive_durations_never_conflict() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 60, StaffRole::Doctor).with_resource("OT"),
            task("zero", 9, 30, 0, StaffRole::Doctor).with_resource("OT"),
            task("negative", 9, 50, -30, StaffRole::Doctor).with_resource("OT"),
        ];
        let annotated = detect(&tasks);
        assert!(annotated.iter().all(|t| !t.has_conflict()), "{name}");
    }
}

#[test]
fn input_order_does_not_change_who_is_flagged() {
    let sorted = vec![
        task("a", 9, 0, 60, StaffRole::Doctor),
        task("b", 9, 30, 60, StaffRole::Doctor),
        task("c", 11, 0, 30, StaffRole::Doctor),
    ];
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 2);

    for &(name, detect) in DETECTORS {
        let mut flagged_sorted: Vec<String> = detect(&sorted)
            .into_iter()
            .filter(|t| t.has_conflict())
            .map(|t| t.task.id)
            .collect();
        let mut flagged_shuffled: Vec<String> = detect(&shuffled)
            .into_iter()
            .filter(|t| t.has_conflict())
            .map(|t| t.task.id)
            .collect();
        flagged_sorted.sort();
        flagged_shuffled.sort();
        assert_eq!(flagged_sorted, flagged_shuffled, "{name}");
        assert_eq!(flagged_sorted, vec!["a", "b"], "{name}");
    }
}

#[test]
fn every_conflict_is_kept_and_primary_prefers_resource() {
    for &(name, detect) in DETECTORS {
        let tasks = vec![
            task("a", 9, 0, 120, StaffRole::Doctor).with_resource("OT"),
            task("b", 9, 15, 30, StaffRole::Doctor),
            task("c", 10, 0, 30, StaffRole::Nurse).with_resource("OT"),
        ];
        let annotated = detect(&tasks);

        assert_eq!(
            kinds(&annotated[0]),
            vec![ConflictKind::Person, ConflictKind::Resource],
            "{name}"
        );
        assert_eq!(partners(&annotated[0]), vec!["b", "c"], "{name}");
        let primary = annotated[0].conflict().unwrap();
        assert_eq!(primary.kind, ConflictKind::Resource, "{name}");
        assert_eq!(primary.with_task, "c", "{name}");
    }
}
