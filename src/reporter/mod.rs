mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::catalog::CatalogSnapshot;
use crate::error::Result;
use crate::ga::GaRunResult;
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all reports and write to output directory
pub fn generate_reports(
    result: &GaRunResult,
    catalog: &CatalogSnapshot,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(result)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(result, catalog);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(result, catalog);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// A single staff member's weekly teaching schedule, grouped by day.
pub fn generate_staff_schedule(
    result: &GaRunResult,
    catalog: &CatalogSnapshot,
    staff_id: &crate::types::StaffId,
) -> Option<String> {
    let staff = catalog.staff_by_id(staff_id)?;

    let mut lines = vec![format!("# Schedule for {} ({})", staff.name, staff.id), String::new()];

    let mut sessions: Vec<_> = result
        .best
        .assignments
        .iter()
        .filter(|a| &a.staff_id == staff_id)
        .collect();
    sessions.sort_by_key(|a| (a.day.index(), a.slot));

    if sessions.is_empty() {
        lines.push("No sessions assigned.".to_string());
    } else {
        lines.push(format!("## Teaching {} sessions\n", sessions.len()));
        for a in sessions {
            lines.push(format!(
                "- **{}** slot {}: {} ({}) - Room {}",
                a.day, a.slot, a.subject_id, a.class_id, a.room_id
            ));
        }
    }

    Some(lines.join("\n"))
}

/// A single class's weekly timetable.
pub fn generate_class_schedule(
    result: &GaRunResult,
    catalog: &CatalogSnapshot,
    class_id: &crate::types::ClassId,
) -> Option<String> {
    let class = catalog.class_by_id(class_id)?;

    let mut lines = vec![
        format!("# Schedule for {} Year {} Sec {}", class.department, class.year, class.section),
        String::new(),
    ];

    let mut sessions: Vec<_> = result
        .best
        .assignments
        .iter()
        .filter(|a| &a.class_id == class_id)
        .collect();
    sessions.sort_by_key(|a| (a.day.index(), a.slot));

    if sessions.is_empty() {
        lines.push("No sessions scheduled.".to_string());
    } else {
        for a in sessions {
            lines.push(format!(
                "- **{}** slot {}: {} with {} in {}",
                a.day, a.slot, a.subject_id, a.staff_id, a.room_id
            ));
        }
    }

    Some(lines.join("\n"))
}
