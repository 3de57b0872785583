use crate::catalog::RawCatalog;
use crate::error::{Result, SchedulerError};
use std::collections::HashSet;

/// Structural consistency checks run once, at snapshot build time. Anything
/// caught here is a `CatalogConsistency` error and aborts construction —
/// there is no meaningful candidate to build against a broken catalog.
pub fn validate_catalog(raw: &RawCatalog) -> Result<()> {
    check_duplicate_ids(raw)?;
    check_dangling_references(raw)?;
    Ok(())
}

fn check_duplicate_ids(raw: &RawCatalog) -> Result<()> {
    let mut seen = HashSet::new();
    for s in &raw.staff {
        if !seen.insert(s.id.0.clone()) {
            return Err(
                SchedulerError::CatalogConsistency(format!("duplicate staff id '{}'", s.id)).into(),
            );
        }
    }
    let mut seen = HashSet::new();
    for s in &raw.subjects {
        if !seen.insert(s.id.0.clone()) {
            return Err(SchedulerError::CatalogConsistency(format!(
                "duplicate subject id '{}'",
                s.id
            ))
            .into());
        }
    }
    let mut seen = HashSet::new();
    for c in &raw.classes {
        if !seen.insert(c.id.0.clone()) {
            return Err(
                SchedulerError::CatalogConsistency(format!("duplicate class id '{}'", c.id)).into(),
            );
        }
    }
    let mut seen = HashSet::new();
    for r in &raw.rooms {
        if !seen.insert(r.id.0.clone()) {
            return Err(
                SchedulerError::CatalogConsistency(format!("duplicate room id '{}'", r.id)).into(),
            );
        }
    }
    Ok(())
}

fn check_dangling_references(raw: &RawCatalog) -> Result<()> {
    let staff_ids: HashSet<_> = raw.staff.iter().map(|s| &s.id).collect();
    let subject_ids: HashSet<_> = raw.subjects.iter().map(|s| &s.id).collect();
    let elective_ids: HashSet<_> = raw.electives.iter().map(|e| &e.id).collect();

    for class in &raw.classes {
        for (subject_id, _) in class.required_lectures.iter().chain(&class.required_labs) {
            if !subject_ids.contains(subject_id) {
                return Err(SchedulerError::CatalogConsistency(format!(
                    "class '{}' references unknown subject '{}'",
                    class.id, subject_id
                ))
                .into());
            }
        }
        for elective_id in &class.electives {
            if !elective_ids.contains(elective_id) {
                return Err(SchedulerError::CatalogConsistency(format!(
                    "class '{}' references unknown elective '{}'",
                    class.id, elective_id
                ))
                .into());
            }
        }
    }

    for elective in &raw.electives {
        if !staff_ids.contains(&elective.staff_id) {
            return Err(SchedulerError::CatalogConsistency(format!(
                "elective '{}' references unknown staff '{}'",
                elective.id, elective.staff_id
            ))
            .into());
        }
        if !subject_ids.contains(&elective.subject_id) {
            return Err(SchedulerError::CatalogConsistency(format!(
                "elective '{}' references unknown subject '{}'",
                elective.id, elective.subject_id
            ))
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use std::collections::HashSet as Set;

    fn staff(id: &str) -> StaffProfile {
        StaffProfile {
            id: StaffId(id.into()),
            name: id.into(),
            department: "CSE".into(),
            rank: Rank::Lecturer,
            email: format!("{id}@x.edu"),
            max_sessions_per_day: 4,
            max_sessions_per_week: 18,
            teaches_lecture: Set::new(),
            teaches_lab: Set::new(),
            teaches_elective: Set::new(),
            absent_dates: vec![],
        }
    }

    #[test]
    fn duplicate_staff_id_is_rejected() {
        let raw = RawCatalog {
            staff: vec![staff("S1"), staff("S1")],
            subjects: vec![],
            classes: vec![],
            rooms: vec![],
            electives: vec![],
        };
        assert!(validate_catalog(&raw).is_err());
    }

    #[test]
    fn dangling_subject_reference_is_rejected() {
        let raw = RawCatalog {
            staff: vec![],
            subjects: vec![],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 60,
                required_lectures: vec![(SubjectId("MISSING".into()), 3)],
                required_labs: vec![],
                electives: vec![],
                working_days: 6,
                slots_per_day: 8,
            }],
            rooms: vec![],
            electives: vec![],
        };
        assert!(validate_catalog(&raw).is_err());
    }

    #[test]
    fn dangling_elective_reference_is_rejected() {
        let raw = RawCatalog {
            staff: vec![],
            subjects: vec![],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 60,
                required_lectures: vec![],
                required_labs: vec![],
                electives: vec![ElectiveId("MISSING".into())],
                working_days: 6,
                slots_per_day: 8,
            }],
            rooms: vec![],
            electives: vec![],
        };
        assert!(validate_catalog(&raw).is_err());
    }
}
