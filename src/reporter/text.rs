use crate::catalog::CatalogSnapshot;
use crate::ga::GaRunResult;
use colored::Colorize;

/// Generate a plain text report (with colors for terminal)
pub fn generate_text_report(result: &GaRunResult, catalog: &CatalogSnapshot) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("          TIMETABLE GENERATION REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generations run: {}", result.generations_run));
    lines.push(format!("Elapsed: {}ms", result.elapsed_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Classes:       {}", catalog.classes().len()));
    lines.push(format!("  Assignments:   {}", result.best.assignments.len()));
    lines.push(format!("  Conflicts:     {}", result.report.conflicts.len()));
    lines.push(format!("  Fitness:       {:.1}/100", result.report.fitness));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if result.report.conflicts.is_empty() {
        lines.push("VALIDATION: PASSED".green().to_string());
    } else {
        lines.push("VALIDATION: FAILED".red().to_string());
        for conflict in &result.report.conflicts {
            lines.push(format!(
                "  ! {:?} on {} slot {}",
                conflict.kind, conflict.day, conflict.slot
            ));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout
pub fn print_summary(result: &GaRunResult) {
    println!();
    if result.report.conflicts.is_empty() {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    } else {
        println!("{}", "✗ Timetable has unresolved conflicts".red().bold());
    }
    println!();
    println!("  Assignments: {}", result.best.assignments.len());
    println!("  Conflicts:   {}", result.report.conflicts.len());
    println!("  Fitness:     {:.1}/100", result.report.fitness);
    println!("  Time:        {}ms", result.elapsed_ms);
    println!();
}
