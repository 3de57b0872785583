//! Timetable scheduler — a genetic-algorithm timetable generator paired
//! with a substitution and conflict-repair engine for a multi-department
//! institution.
//!
//! # Algorithm overview
//!
//! The GA evolves a population of full-week candidate timetables:
//! 1. **Initial-Solution Builder** seeds each candidate by placing every
//!    class's required lectures, labs, and electives independently.
//! 2. **Constraint Evaluator** scores a candidate out of 100, subtracting
//!    weighted penalties for conflicts, workload overruns, preference
//!    mismatches, and poor subject distribution.
//! 3. **GA Operators** (tournament selection, class-partitioned crossover,
//!    three-way mutation) produce the next generation.
//! 4. **GA Driver** runs the generational loop with elitism, early-stop on
//!    fitness, and cooperative cancellation/timeout.
//!
//! Once a timetable is committed, the **Substitute Finder** and **Conflict
//! Repair** components operate directly on committed records: finding a
//! ranked stand-in for an absent staff member, and auto-resolving
//! double-bookings by relocating the losing record.
//!
//! # Example
//!
//! ```no_run
//! use timetable_scheduler::ga::{self, CancellationToken};
//! use timetable_scheduler::parser::load_catalog_from_dir;
//! use timetable_scheduler::types::GaConfig;
//! use std::path::Path;
//!
//! let catalog = load_catalog_from_dir(Path::new("./demos/fixtures")).unwrap();
//! let config = GaConfig::default();
//! let result = ga::run(&catalog, &config, &CancellationToken::new());
//! println!("fitness: {:.1}", result.report.fitness);
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod parser;
pub mod reporter;
pub mod store;
pub mod substitution;
pub mod types;

pub use error::{Result, SchedulerError};
