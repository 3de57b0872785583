use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use timetable_scheduler::catalog::CatalogSnapshot;
use timetable_scheduler::ga::{self, CancellationToken, GaRunResult};
use timetable_scheduler::parser::{load_catalog_from_dir, load_ga_config_or_default};
use timetable_scheduler::reporter::{
    generate_class_schedule, generate_reports, generate_staff_schedule, print_summary, OutputFormat,
};
use timetable_scheduler::store::{memory::InMemorySchedule, SchedulePort};
use timetable_scheduler::substitution::{auto_resolve_conflicts, find_substitute};
use timetable_scheduler::types::{Assignment, ClassId, GaConfig, ScheduleRecord, StaffId, SubstitutionRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timetable-scheduler")]
#[command(about = "Genetic-algorithm timetable scheduler and substitution engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GA against bundled demo fixtures
    Demo,

    /// Generate a timetable from catalog data
    Generate {
        /// Directory containing staff/subjects/classes/rooms JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for generated reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,

        /// Optional path to a GA config TOML file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the PRNG seed from the config file
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Re-score an existing timetable (reads from --data, regenerates and reports)
    Validate {
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Find a substitute for a staff member absent on a given date
    Substitute {
        #[arg(short, long)]
        data: PathBuf,

        /// Staff id who is absent
        #[arg(long)]
        staff: String,

        /// Date of absence, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Reason recorded on the pending substitution
        #[arg(long, default_value = "unspecified")]
        reason: String,
    },

    /// Detect and auto-resolve double-booking conflicts in a generated timetable
    Repair {
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Print a single staff member's or class's slice of a generated timetable
    Report {
        #[arg(short, long)]
        data: PathBuf,

        /// Report a specific staff member's schedule
        #[arg(long)]
        staff: Option<String>,

        /// Report a specific class's schedule
        #[arg(long)]
        class: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Generate {
            data,
            output,
            format,
            quiet,
            config,
            seed,
        } => run_generate(&data, &output, &format, quiet, config.as_deref(), seed),
        Commands::Validate { data } => run_validate(&data),
        Commands::Substitute { data, staff, date, reason } => run_substitute(&data, &staff, &date, &reason),
        Commands::Repair { data } => run_repair(&data),
        Commands::Report { data, staff, class } => run_report(&data, staff, class),
    }
}

fn run_demo() -> Result<()> {
    println!("{}", "Timetable Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("demos/fixtures");
    if !demo_path.join("staff.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    run_generate(&demo_path, &PathBuf::from("output"), "all", false, None, None)
}

fn run_generate(
    data: &PathBuf,
    output: &PathBuf,
    format: &str,
    quiet: bool,
    config_path: Option<&std::path::Path>,
    seed_override: Option<u64>,
) -> Result<()> {
    let catalog = load_catalog_from_dir(data).context("Failed to load catalog data")?;

    let mut config = config_path
        .map(load_ga_config_or_default)
        .unwrap_or_default();
    if let Some(seed) = seed_override {
        config.seed = seed;
    }

    if !quiet {
        println!(
            "Loaded {} staff, {} subjects, {} classes, {} rooms",
            catalog.staff().len(),
            catalog.subjects().len(),
            catalog.classes().len(),
            catalog.rooms().len()
        );
        println!("\nEvolving timetable (population {}, up to {} generations)...\n", config.population_size, config.generations);
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Evolving population of {}...", config.population_size));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        pb
    };

    let result = ga::run(&catalog, &config, &CancellationToken::new());
    progress.finish_with_message(format!(
        "Ran {} generations, best fitness {:.1}",
        result.generations_run, result.report.fitness
    ));

    let formats = parse_formats(format);
    generate_reports(&result, &catalog, output, &formats)?;

    if quiet {
        let summary = timetable_scheduler::reporter::generate_json_summary(&result)?;
        println!("{}", summary);
    } else {
        print_summary(&result);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(data: &PathBuf) -> Result<()> {
    let catalog = load_catalog_from_dir(data)?;
    let config = GaConfig::default();
    let result: GaRunResult = ga::run(&catalog, &config, &CancellationToken::new());

    if result.report.conflicts.is_empty() {
        println!("{}", "✓ Timetable is conflict-free".green().bold());
    } else {
        println!("{}", "✗ Timetable has conflicts".red().bold());
        for conflict in &result.report.conflicts {
            println!("  - {:?} on {} slot {}", conflict.kind, conflict.day, conflict.slot);
        }
    }
    println!("\nFitness: {:.1}/100", result.report.fitness);

    Ok(())
}

/// Turns one GA gene into a committable schedule record with a stable,
/// content-derived id (so repeated commits of the same candidate don't
/// churn ids) and its fixed slot-time table entry filled in.
fn assignment_to_record(a: &Assignment) -> ScheduleRecord {
    let (start_time, end_time) = timetable_scheduler::types::slot_times_or_default(a.slot);
    ScheduleRecord {
        id: format!("{}-{}-{}", a.class_id, a.day.index(), a.slot),
        class_id: a.class_id.clone(),
        day: a.day,
        slot: a.slot,
        subject_id: a.subject_id.clone(),
        staff_id: a.staff_id.clone(),
        room_id: a.room_id.clone(),
        is_lab: a.is_lab,
        is_elective: a.is_elective,
        week_number: 1,
        academic_year: "2026-27".to_string(),
        start_time,
        end_time,
        original_staff_id: None,
    }
}

fn run_substitute(data: &PathBuf, staff: &str, date: &str, reason: &str) -> Result<()> {
    let catalog: CatalogSnapshot = load_catalog_from_dir(data)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").context("Expected date as YYYY-MM-DD")?;

    let config = GaConfig::default();
    let result = ga::run(&catalog, &config, &CancellationToken::new());

    // The generated timetable is the "committed schedule" this CLI path
    // operates against; a real deployment backs `SchedulePort` with a
    // database holding the actually-committed records instead.
    let store = InMemorySchedule::new();
    let records: Vec<ScheduleRecord> = result.best.assignments.iter().map(assignment_to_record).collect();
    store.commit(records)?;

    let staff_id = StaffId(staff.to_string());
    let committed = store.committed_records()?;
    let affected: Vec<_> = committed.iter().filter(|r| r.staff_id == staff_id).collect();

    if affected.is_empty() {
        println!("Staff '{}' has no sessions in the generated timetable", staff);
        return Ok(());
    }

    for record in affected {
        match find_substitute(&catalog, record, date, &committed) {
            Some(candidate) => {
                let substitution = SubstitutionRecord {
                    id: format!("SUB-{}-{}", record.id, date),
                    schedule_record_id: record.id.clone(),
                    substitute_staff_id: candidate.staff_id.clone(),
                    date,
                    reason: reason.to_string(),
                    approved: false,
                    approved_by: None,
                };
                store.append_substitution(substitution)?;
                println!(
                    "{} slot {}: substitute {} (score {:.1}), recorded as pending",
                    record.day, record.slot, candidate.staff_id, candidate.score
                );
            }
            None => println!("{} slot {}: no eligible substitute found", record.day, record.slot),
        }
    }

    Ok(())
}

fn run_repair(data: &PathBuf) -> Result<()> {
    let catalog = load_catalog_from_dir(data)?;
    let config = GaConfig::default();
    let result = ga::run(&catalog, &config, &CancellationToken::new());

    let store = InMemorySchedule::new();
    let records: Vec<ScheduleRecord> = result.best.assignments.iter().map(assignment_to_record).collect();
    store.commit(records)?;

    let mut committed = store.committed_records()?;
    let report = auto_resolve_conflicts(&catalog, &mut committed);
    // Repair moves are committed back atomically, same as a fresh GA result.
    store.commit(committed)?;

    println!("Resolved: {}", report.resolved.len());
    println!("Unresolved: {}", report.unresolved.len());

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn run_report(data: &PathBuf, staff: Option<String>, class: Option<String>) -> Result<()> {
    let catalog = load_catalog_from_dir(data)?;
    let config = GaConfig::default();
    let result: GaRunResult = ga::run(&catalog, &config, &CancellationToken::new());

    if let Some(staff_id) = staff {
        let id = StaffId(staff_id);
        match generate_staff_schedule(&result, &catalog, &id) {
            Some(report) => println!("{}", report),
            None => println!("Staff member not found"),
        }
    } else if let Some(class_id) = class {
        let id = ClassId(class_id);
        match generate_class_schedule(&result, &catalog, &id) {
            Some(report) => println!("{}", report),
            None => println!("Class not found"),
        }
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let staff = serde_json::json!([
        {"id": "t001", "name": "Dr. Rao", "department": "CSE", "rank": "professor", "email": "rao@example.edu",
         "max_sessions_per_day": 5, "max_sessions_per_week": 20,
         "teaches_lecture": ["cs101"], "teaches_lab": ["cs101lab"], "teaches_elective": [], "absent_dates": []},
        {"id": "t002", "name": "Ms. Iyer", "department": "CSE", "rank": "assistant_professor", "email": "iyer@example.edu",
         "max_sessions_per_day": 5, "max_sessions_per_week": 20,
         "teaches_lecture": ["cs102"], "teaches_lab": ["cs101lab"], "teaches_elective": ["el101"], "absent_dates": []},
        {"id": "t003", "name": "Mr. Khan", "department": "CSE", "rank": "lecturer", "email": "khan@example.edu",
         "max_sessions_per_day": 6, "max_sessions_per_week": 24,
         "teaches_lecture": ["cs101", "cs102"], "teaches_lab": [], "teaches_elective": [], "absent_dates": []}
    ]);
    std::fs::write(path.join("staff.json"), serde_json::to_string_pretty(&staff)?)?;

    let subjects = serde_json::json!([
        {"id": "cs101", "name": "Intro to Programming", "kind": "core", "department": "CSE",
         "semester": 1, "credits": 4, "hours_per_week": 3, "is_lab": false, "lab_block_length": 1},
        {"id": "cs101lab", "name": "Programming Lab", "kind": "lab", "department": "CSE",
         "semester": 1, "credits": 1, "hours_per_week": 2, "is_lab": true, "lab_block_length": 2},
        {"id": "cs102", "name": "Data Structures", "kind": "core", "department": "CSE",
         "semester": 1, "credits": 4, "hours_per_week": 3, "is_lab": false, "lab_block_length": 1},
        {"id": "el101", "name": "Web Development", "kind": "elective", "department": "CSE",
         "semester": 1, "credits": 2, "hours_per_week": 2, "is_lab": false, "lab_block_length": 1}
    ]);
    std::fs::write(path.join("subjects.json"), serde_json::to_string_pretty(&subjects)?)?;

    let classes = serde_json::json!([
        {"id": "c1a", "year": 1, "section": "A", "department": "CSE", "headcount": 55,
         "required_lectures": [["cs101", 3], ["cs102", 3]],
         "required_labs": [["cs101lab", 1]],
         "electives": ["el001"], "working_days": 6, "slots_per_day": 8}
    ]);
    std::fs::write(path.join("classes.json"), serde_json::to_string_pretty(&classes)?)?;

    let rooms = serde_json::json!([
        {"id": "r101", "name": "Room 101", "kind": "classroom", "capacity": 60, "department": null, "active": true},
        {"id": "lab1", "name": "CS Lab 1", "kind": "lab", "capacity": 30, "department": "CSE", "active": true}
    ]);
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;

    let electives = serde_json::json!([
        {"id": "el001", "subject_id": "el101", "offering_department": "CSE", "staff_id": "t002",
         "hours_per_week": 2, "enrolled_classes": ["c1a"], "capacity": 55}
    ]);
    std::fs::write(path.join("electives.json"), serde_json::to_string_pretty(&electives)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
