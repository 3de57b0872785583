use crate::catalog::CatalogSnapshot;
use crate::ga::GaRunResult;
use crate::types::ClassId;
use std::collections::HashMap;

pub fn generate_markdown_report(result: &GaRunResult, catalog: &CatalogSnapshot) -> String {
    let mut lines = vec![
        "# Timetable Generation Report".to_string(),
        String::new(),
        format!("Generations run: {}", result.generations_run),
        format!("Elapsed: {}ms", result.elapsed_ms),
        String::new(),
    ];

    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Total assignments | {} |", result.best.assignments.len()));
    lines.push(format!("| Fitness | {:.1}/100 |", result.report.fitness));
    lines.push(format!("| Conflicts | {} |", result.report.conflicts.len()));
    lines.push(format!("| Conflict penalty | {:.1} |", result.report.penalties.conflict));
    lines.push(format!("| Workload penalty | {:.1} |", result.report.penalties.workload));
    lines.push(format!(
        "| Distribution penalty | {:.1} |",
        result.report.penalties.distribution
    ));
    lines.push(String::new());

    if result.report.conflicts.is_empty() {
        lines.push("## Validation: PASSED\n".to_string());
    } else {
        lines.push("## Validation: FAILED\n".to_string());
        for conflict in &result.report.conflicts {
            lines.push(format!(
                "- **{:?}** on {} slot {}",
                conflict.kind, conflict.day, conflict.slot
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Classes\n".to_string());
    let mut by_class: HashMap<&ClassId, Vec<&crate::types::Assignment>> = HashMap::new();
    for a in &result.best.assignments {
        by_class.entry(&a.class_id).or_default().push(a);
    }

    let mut class_ids: Vec<_> = by_class.keys().collect();
    class_ids.sort_by_key(|c| c.0.clone());

    for class_id in class_ids {
        let name = catalog
            .class_by_id(class_id)
            .map(|c| format!("{} Year {} Sec {}", c.department, c.year, c.section))
            .unwrap_or_else(|| class_id.to_string());

        lines.push(format!("### {}\n", name));
        lines.push("| Day | Slot | Subject | Staff | Room |".to_string());
        lines.push("|-----|------|---------|-------|------|".to_string());

        let mut genes = by_class[class_id].clone();
        genes.sort_by_key(|a| (a.day.index(), a.slot));

        for a in genes {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                a.day, a.slot, a.subject_id, a.staff_id, a.room_id
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
