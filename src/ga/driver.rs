//! GA Driver (C6): the generational evolution loop. Single-threaded across
//! generations — selection always reads a fully-formed, sorted population
//! from the generation before — but a generation's fitness evaluation runs
//! in parallel across candidates, since the evaluator is a pure function.

use crate::catalog::CatalogSnapshot;
use crate::ga::builder::build_population;
use crate::ga::evaluator::{evaluate, FitnessReport};
use crate::ga::operators::{crossover, mutate, tournament_select};
use crate::types::{Candidate, GaConfig};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cooperative cancellation: checked between generations, never mid-generation.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub best_conflicts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub enum StopReason {
    EarlyStopFitness,
    GenerationLimit,
    Timeout,
    Cancelled,
}

pub struct GaRunResult {
    pub best: Candidate,
    pub report: FitnessReport,
    pub history: Vec<GenerationStats>,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub elapsed_ms: u64,
}

pub fn run(catalog: &CatalogSnapshot, config: &GaConfig, cancel: &CancellationToken) -> GaRunResult {
    let started = Instant::now();
    let mut master_rng = SmallRng::seed_from_u64(config.seed);

    let mut builder_rng = SmallRng::seed_from_u64(master_rng.gen());
    let mut population = build_population(catalog, config.population_size, &mut builder_rng);

    let mut history = Vec::new();
    let mut stop_reason = StopReason::GenerationLimit;
    let mut generations_run = 0;

    let elite_count = config.elite_count();

    let mut best_ever: Option<(Candidate, FitnessReport)> = None;

    for generation in 0..config.generations {
        generations_run = generation + 1;

        if cancel.is_cancelled() {
            stop_reason = StopReason::Cancelled;
            break;
        }
        if let Some(limit) = config.timeout_ms {
            if started.elapsed().as_millis() as u64 >= limit {
                stop_reason = StopReason::Timeout;
                break;
            }
        }

        let reports: Vec<FitnessReport> = population.par_iter().map(|c| evaluate(c, catalog)).collect();

        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|&a, &b| reports[b].fitness.partial_cmp(&reports[a].fitness).unwrap());

        let best_index = ranked[0];
        let mean_fitness = reports.iter().map(|r| r.fitness).sum::<f64>() / reports.len() as f64;
        history.push(GenerationStats {
            generation,
            best_fitness: reports[best_index].fitness,
            mean_fitness,
            best_conflicts: reports[best_index].conflicts.len(),
        });

        let improves = best_ever
            .as_ref()
            .map(|(_, r)| reports[best_index].fitness > r.fitness)
            .unwrap_or(true);
        if improves {
            best_ever = Some((population[best_index].clone(), reports[best_index].clone()));
        }

        tracing::info!(
            generation,
            best_fitness = reports[best_index].fitness,
            mean_fitness,
            "generation evaluated"
        );

        if reports[best_index].fitness >= config.early_stop_fitness
            && reports[best_index].conflicts.is_empty()
        {
            stop_reason = StopReason::EarlyStopFitness;
            break;
        }

        let fitness_of: Vec<f64> = reports.iter().map(|r| r.fitness).collect();

        let mut next_population: Vec<Candidate> = ranked
            .iter()
            .take(elite_count)
            .map(|&i| population[i].clone())
            .collect();

        let mut op_rng = SmallRng::seed_from_u64(master_rng.gen());
        while next_population.len() < config.population_size {
            let parent_a = tournament_select(&population, &fitness_of, config.tournament_size, &mut op_rng);
            let parent_b = tournament_select(&population, &fitness_of, config.tournament_size, &mut op_rng);
            let (mut child_a, mut child_b) =
                crossover(parent_a, parent_b, config.crossover_rate, &mut op_rng);
            mutate(&mut child_a, catalog, config.mutation_rate, &mut op_rng);
            mutate(&mut child_b, catalog, config.mutation_rate, &mut op_rng);
            next_population.push(child_a);
            if next_population.len() < config.population_size {
                next_population.push(child_b);
            }
        }

        population = next_population;
    }

    let (best, report) = best_ever.unwrap_or_else(|| {
        let report = evaluate(&population[0], catalog);
        (population[0].clone(), report)
    });

    GaRunResult {
        best,
        report,
        history,
        generations_run,
        stop_reason,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::types::*;
    use std::collections::HashSet;

    fn toy_catalog() -> CatalogSnapshot {
        CatalogSnapshot::build(RawCatalog {
            staff: vec![StaffProfile {
                id: StaffId("S1".into()),
                name: "A".into(),
                department: "CSE".into(),
                rank: Rank::Lecturer,
                email: "a@x.edu".into(),
                max_sessions_per_day: 8,
                max_sessions_per_week: 40,
                teaches_lecture: HashSet::from([SubjectId("CS101".into())]),
                teaches_lab: HashSet::new(),
                teaches_elective: HashSet::new(),
                absent_dates: vec![],
            }],
            subjects: vec![SubjectSpec {
                id: SubjectId("CS101".into()),
                name: "Intro".into(),
                kind: SubjectKind::Core,
                department: "CSE".into(),
                semester: 1,
                credits: 3,
                hours_per_week: 2,
                is_lab: false,
                lab_block_length: 1,
            }],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 40,
                required_lectures: vec![(SubjectId("CS101".into()), 2)],
                required_labs: vec![],
                electives: vec![],
                working_days: 6,
                slots_per_day: 8,
            }],
            rooms: vec![Room {
                id: RoomId("R1".into()),
                name: "101".into(),
                kind: RoomKind::Classroom,
                capacity: 60,
                department: None,
                active: true,
            }],
            electives: vec![],
        })
        .unwrap()
    }

    #[test]
    fn run_reaches_zero_conflicts_on_a_trivial_catalog() {
        let catalog = toy_catalog();
        let config = GaConfig {
            population_size: 20,
            generations: 100,
            ..GaConfig::default()
        };
        let result = run(&catalog, &config, &CancellationToken::new());
        assert_eq!(result.report.conflicts.len(), 0);
        assert_eq!(result.best.assignments.len(), 2);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let catalog = toy_catalog();
        let config = GaConfig {
            population_size: 10,
            generations: 15,
            seed: 99,
            ..GaConfig::default()
        };
        let a = run(&catalog, &config, &CancellationToken::new());
        let b = run(&catalog, &config, &CancellationToken::new());
        assert_eq!(a.best.assignments, b.best.assignments);
        assert_eq!(a.report.fitness, b.report.fitness);
    }

    #[test]
    fn best_ever_fitness_never_regresses_across_history() {
        let catalog = toy_catalog();
        let config = GaConfig {
            population_size: 10,
            generations: 10,
            early_stop_fitness: 1000.0,
            ..GaConfig::default()
        };
        let result = run(&catalog, &config, &CancellationToken::new());
        let mut running_best = f64::MIN;
        for stat in &result.history {
            assert!(stat.best_fitness >= running_best || running_best == f64::MIN);
            running_best = running_best.max(stat.best_fitness);
        }
    }

    #[test]
    fn cancellation_stops_the_loop_promptly() {
        let catalog = toy_catalog();
        let config = GaConfig {
            population_size: 10,
            generations: 1000,
            early_stop_fitness: 1000.0,
            ..GaConfig::default()
        };
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = run(&catalog, &config, &cancel);
        assert_eq!(result.generations_run, 1);
    }
}
