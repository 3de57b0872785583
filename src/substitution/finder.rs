//! Substitute Finder (C7): given a `ScheduleRecord` whose original staff
//! member is absent on a date, ranks every staff member who passes four
//! hard filters and returns the highest-scoring candidate.

use crate::catalog::{Capability, CatalogSnapshot};
use crate::types::{Rank, ScheduleRecord, StaffId, StaffProfile};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct SubstituteCandidate {
    pub staff_id: StaffId,
    pub score: f64,
}

/// The four hard filters, applied in order so the first failure explains
/// why a staff member was never even scored.
fn passes_hard_filters(
    staff: &StaffProfile,
    record: &ScheduleRecord,
    date: NaiveDate,
    committed: &[ScheduleRecord],
) -> bool {
    if staff.is_absent_on(date) {
        return false;
    }

    let capability_ok = if record.is_lab {
        staff.can_teach_lab(&record.subject_id)
    } else if record.is_elective {
        staff.can_teach_elective(&record.subject_id)
    } else {
        staff.can_teach_lecture(&record.subject_id)
    };
    if !capability_ok {
        return false;
    }

    let has_conflict = committed
        .iter()
        .any(|r| r.staff_id == staff.id && r.day == record.day && r.slot == record.slot && r.id != record.id);
    if has_conflict {
        return false;
    }

    let daily_load = committed
        .iter()
        .filter(|r| r.staff_id == staff.id && r.day == record.day)
        .count() as u32;
    let weekly_load = committed.iter().filter(|r| r.staff_id == staff.id).count() as u32;
    if daily_load >= staff.max_sessions_per_day || weekly_load >= staff.max_sessions_per_week {
        return false;
    }

    true
}

fn score_candidate(
    staff: &StaffProfile,
    record: &ScheduleRecord,
    original_department: Option<&str>,
    original_rank: Option<Rank>,
    committed: &[ScheduleRecord],
) -> f64 {
    let mut score = 0.0;

    if original_department.map(|d| d == staff.department).unwrap_or(false) {
        score += 30.0;
    }

    if original_rank.map(|r| r == staff.rank).unwrap_or(false) {
        score += 20.0;
    }

    score += if record.is_lab {
        40.0
    } else if record.is_elective {
        35.0
    } else {
        40.0
    };

    let weekly_load = committed.iter().filter(|r| r.staff_id == staff.id).count() as u32;
    if staff.max_sessions_per_week > 0 {
        let ratio = weekly_load as f64 / staff.max_sessions_per_week as f64;
        score += (20.0 * (1.0 - ratio)).max(0.0);
    }

    score += staff.rank.substitute_score();

    let daily_conflicts = committed
        .iter()
        .filter(|r| r.staff_id == staff.id && r.day == record.day)
        .count() as u32;
    score += (15.0 - 3.0 * daily_conflicts as f64).max(0.0);

    score
}

/// Finds the best-scoring eligible substitute for `record` on `date`, or
/// `None` if nobody passes the hard filters.
pub fn find_substitute(
    catalog: &CatalogSnapshot,
    record: &ScheduleRecord,
    date: NaiveDate,
    committed: &[ScheduleRecord],
) -> Option<SubstituteCandidate> {
    let capability = if record.is_lab {
        Capability::Lab
    } else if record.is_elective {
        Capability::Elective
    } else {
        Capability::Lecture
    };

    let original = catalog.staff_by_id(&record.staff_id);
    let original_department = original.map(|s| s.department.as_str());
    let original_rank = original.map(|s| s.rank);

    let mut ranked: Vec<(SubstituteCandidate, f64, &StaffId)> = catalog
        .eligible_staff_for(&record.subject_id, capability)
        .iter()
        .filter_map(|staff_id| catalog.staff_by_id(staff_id))
        .filter(|staff| staff.id != record.staff_id)
        .filter(|staff| passes_hard_filters(staff, record, date, committed))
        .map(|staff| {
            (
                SubstituteCandidate {
                    staff_id: staff.id.clone(),
                    score: score_candidate(staff, record, original_department, original_rank, committed),
                },
                staff.rank.substitute_score(),
                &staff.id,
            )
        })
        .collect();

    // Ties broken by rank, then identifier, so the outcome is stable rather
    // than dependent on the eligible-staff index's insertion order.
    ranked.sort_by(|(a, a_rank, a_id), (b, b_rank, b_id)| {
        a.score
            .partial_cmp(&b.score)
            .unwrap()
            .then(a_rank.partial_cmp(b_rank).unwrap())
            .then(b_id.0.cmp(&a_id.0))
    });
    ranked.into_iter().next_back().map(|(candidate, _, _)| candidate)
}
