use crate::error::Result;
use crate::ga::GaRunResult;
use serde::Serialize;

/// Full JSON report of a GA run: best candidate, its fitness breakdown, and
/// the per-generation history.
pub fn generate_json_report(result: &GaRunResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ReportPayload {
        best: &result.best,
        report: &result.report,
        history: &result.history,
        generations_run: result.generations_run,
        elapsed_ms: result.elapsed_ms,
    })?)
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    best: &'a crate::types::Candidate,
    report: &'a crate::ga::FitnessReport,
    history: &'a [crate::ga::GenerationStats],
    generations_run: usize,
    elapsed_ms: u64,
}

#[derive(Serialize)]
pub struct JsonSummary {
    pub total_assignments: usize,
    pub fitness: f64,
    pub conflicts: usize,
    pub generations_run: usize,
    pub elapsed_ms: u64,
}

pub fn generate_json_summary(result: &GaRunResult) -> Result<String> {
    let summary = JsonSummary {
        total_assignments: result.best.assignments.len(),
        fitness: result.report.fitness,
        conflicts: result.report.conflicts.len(),
        generations_run: result.generations_run,
        elapsed_ms: result.elapsed_ms,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
