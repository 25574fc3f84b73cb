//! Command-line entry point for day schedules.
//!
//! # Responsibility
//! - Load patients and config from JSON files and print one clinic day.
//! - Keep output deterministic so it can be diffed in local checks.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clinic_schedule_core::{
    core_version, init_logging, parse_staff_role, AgendaFilter, ConflictStrategy, DaySchedule,
    InMemoryPatientRepository, ScheduleConfig, ScheduleService, ScheduledTask,
};
use std::process::ExitCode;

/// Clinic day schedule with double-booking detection
#[derive(Parser, Debug)]
#[command(name = "clinic-schedule")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the agenda for one day, conflicts marked with `!`
    Agenda(DayArgs),
    /// Print only tasks involved in a double-booking
    Conflicts(DayArgs),
    /// Print the core library version
    Version,
}

#[derive(Args, Debug)]
struct DayArgs {
    /// JSON array of patients with their pathways
    #[arg(short, long)]
    patients: String,
    /// Calendar day in clinic-local time (YYYY-MM-DD)
    #[arg(short, long)]
    date: NaiveDate,
    /// Path to a schedule config JSON file
    #[arg(short, long)]
    config: Option<String>,
    /// Only show tasks assigned to this role
    #[arg(short, long)]
    role: Option<String>,
    /// Case-insensitive search over task title and patient name
    #[arg(short, long)]
    search: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Agenda(args) => run_day(&args, false),
        Command::Conflicts(args) => run_day(&args, true),
        Command::Version => {
            println!("clinic_schedule_core version={}", core_version());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_day(args: &DayArgs, conflicts_only: bool) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => ScheduleConfig::load(path).map_err(|err| err.to_string())?,
        None => ScheduleConfig::default(),
    };

    if let Some(log_dir) = &args.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let filter = build_filter(args)?;
    let repo = InMemoryPatientRepository::load(&args.patients).map_err(|err| err.to_string())?;
    let service = ScheduleService::new(repo, config).map_err(|err| err.to_string())?;
    let schedule = service
        .day_schedule(args.date)
        .map_err(|err| err.to_string())?;

    let visible: Vec<&ScheduledTask> = schedule
        .agenda(&filter)
        .into_iter()
        .filter(|task| !conflicts_only || task.has_conflict())
        .collect();

    if args.json {
        print_json(&schedule, &visible)
    } else {
        print_text(&schedule, &visible, service.config().strategy);
        Ok(())
    }
}

fn build_filter(args: &DayArgs) -> Result<AgendaFilter, String> {
    let mut filter = AgendaFilter::new();
    if let Some(role) = &args.role {
        filter = filter.with_role(parse_staff_role(role).map_err(|err| err.to_string())?);
    }
    if let Some(search) = &args.search {
        filter = filter.with_search(search.clone());
    }
    Ok(filter)
}

fn print_json(schedule: &DaySchedule, visible: &[&ScheduledTask]) -> Result<(), String> {
    let rejected: Vec<serde_json::Value> = schedule
        .rejected
        .iter()
        .map(|rejected| {
            serde_json::json!({
                "taskId": rejected.task_id,
                "reason": rejected.error.to_string(),
            })
        })
        .collect();
    let document = serde_json::json!({
        "day": schedule.day.to_string(),
        "tasks": visible,
        "rejected": rejected,
        "patientColors": schedule.patient_colors,
    });
    let rendered = serde_json::to_string_pretty(&document).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn print_text(schedule: &DaySchedule, visible: &[&ScheduledTask], strategy: ConflictStrategy) {
    let offset = schedule.offset();
    println!(
        "{} tasks={} shown={} strategy={}",
        schedule.day,
        schedule.tasks.len(),
        visible.len(),
        strategy.as_str()
    );

    for scheduled in visible {
        let task = &scheduled.task;
        let start = task.due_at.with_timezone(&offset).format("%H:%M");
        let end = task
            .end_at()
            .map(|end| end.with_timezone(&offset).format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        let marker = if scheduled.has_conflict() { "!" } else { " " };
        let resource = task.resource_required.as_deref().unwrap_or("-");

        println!(
            "{marker} {start}-{end} {:<13} {:<4} {} ({})",
            task.assigned_to.as_str(),
            resource,
            task.title,
            task.patient_name
        );
        for conflict in &scheduled.conflicts {
            println!("      {}", conflict.message);
        }
    }

    for rejected in &schedule.rejected {
        println!("skipped {}: {}", rejected.task_id, rejected.error);
    }
}
