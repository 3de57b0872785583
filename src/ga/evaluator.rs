//! Constraint Evaluator (C3): scores a candidate timetable and reports the
//! conflicts found in it. Pure function of `(Candidate, CatalogSnapshot)` —
//! it never touches a PRNG, which is what lets the driver evaluate an
//! entire generation in parallel and still get a reproducible ranking.

use crate::catalog::CatalogSnapshot;
use crate::types::{Assignment, Candidate, ClassId, StaffId, Weekday};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConflictKind {
    StaffDoubleBooked,
    RoomDoubleBooked,
    ClassDoubleBooked,
    LabInNonLabRoom,
}

#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub day: Weekday,
    pub slot: u8,
    /// Index into `Candidate::assignments` of the assignment that lost the
    /// collision (first-seen-wins, so this is always the second or later
    /// occupant of the key).
    pub assignment_index: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PenaltyBreakdown {
    pub conflict: f64,
    pub workload: f64,
    pub preference: f64,
    pub distribution: f64,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> f64 {
        self.conflict + self.workload + self.preference + self.distribution
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FitnessReport {
    pub fitness: f64,
    pub conflicts: Vec<Conflict>,
    pub penalties: PenaltyBreakdown,
}

const CONFLICT_WEIGHT: f64 = 10.0;
const WORKLOAD_WEIGHT: f64 = 5.0;
const PREFERENCE_WEIGHT: f64 = 2.0;
const DISTRIBUTION_WEIGHT: f64 = 3.0;
/// Preference scoring hook: no preference signal is modeled yet, so every
/// candidate scores the same baseline (k = 0) here. Kept as a distinct term
/// rather than folded away so a future preference source only has to change
/// this function.
const PREFERENCE_BASELINE_K: f64 = 0.0;

pub fn evaluate(candidate: &Candidate, catalog: &CatalogSnapshot) -> FitnessReport {
    let conflicts = detect_conflicts(candidate, catalog);
    let workload_excess = workload_excess(candidate, catalog);
    let distribution_pairs = consecutive_same_subject_pairs(candidate);

    let penalties = PenaltyBreakdown {
        conflict: CONFLICT_WEIGHT * conflicts.len() as f64,
        workload: WORKLOAD_WEIGHT * workload_excess as f64,
        preference: PREFERENCE_WEIGHT * PREFERENCE_BASELINE_K,
        distribution: DISTRIBUTION_WEIGHT * distribution_pairs as f64,
    };

    let fitness = (100.0 - penalties.total()).clamp(0.0, 100.0);

    FitnessReport {
        fitness,
        conflicts,
        penalties,
    }
}

/// Hash-table collision detection: three tables keyed by
/// (staff,day,slot)/(room,day,slot)/(class,day,slot), first occupant wins,
/// every later occupant of the same key is a conflict; plus a direct scan
/// for lab sessions sitting in a room that isn't a lab. O(n) in the number
/// of assignments.
pub fn detect_conflicts(candidate: &Candidate, catalog: &CatalogSnapshot) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    record_collisions(
        candidate,
        |a: &Assignment| a.staff_slot_key(),
        ConflictKind::StaffDoubleBooked,
        &mut conflicts,
    );
    record_collisions(
        candidate,
        |a: &Assignment| a.room_slot_key(),
        ConflictKind::RoomDoubleBooked,
        &mut conflicts,
    );
    record_collisions(
        candidate,
        |a: &Assignment| a.class_slot_key(),
        ConflictKind::ClassDoubleBooked,
        &mut conflicts,
    );

    for (index, assignment) in candidate.assignments.iter().enumerate() {
        let room_is_lab = catalog
            .room_by_id(&assignment.room_id)
            .map(|r| r.kind == crate::types::RoomKind::Lab)
            .unwrap_or(false);
        if assignment.is_lab != room_is_lab {
            conflicts.push(Conflict {
                kind: ConflictKind::LabInNonLabRoom,
                day: assignment.day,
                slot: assignment.slot,
                assignment_index: index,
            });
        }
    }

    conflicts.sort_by_key(|c| c.assignment_index);
    conflicts
}

fn record_collisions<K: std::hash::Hash + Eq>(
    candidate: &Candidate,
    key_fn: impl Fn(&Assignment) -> K,
    kind: ConflictKind,
    out: &mut Vec<Conflict>,
) {
    let mut seen: HashMap<K, ()> = HashMap::new();
    for (index, assignment) in candidate.assignments.iter().enumerate() {
        let key = key_fn(assignment);
        if seen.contains_key(&key) {
            out.push(Conflict {
                kind,
                day: assignment.day,
                slot: assignment.slot,
                assignment_index: index,
            });
        } else {
            seen.insert(key, ());
        }
    }
}

/// Staff members whose assigned daily or weekly session count exceeds
/// their cap, summed across every such violation — daily and weekly
/// overruns are counted independently, so a staff member over both caps
/// contributes to both sums.
fn workload_excess(candidate: &Candidate, catalog: &CatalogSnapshot) -> u32 {
    let mut weekly_load: HashMap<&StaffId, u32> = HashMap::new();
    let mut daily_load: HashMap<(&StaffId, Weekday), u32> = HashMap::new();
    for a in &candidate.assignments {
        *weekly_load.entry(&a.staff_id).or_insert(0) += 1;
        *daily_load.entry((&a.staff_id, a.day)).or_insert(0) += 1;
    }

    let weekly_excess: u32 = weekly_load
        .into_iter()
        .map(|(staff_id, load)| {
            catalog
                .staff_by_id(staff_id)
                .map(|s| load.saturating_sub(s.max_sessions_per_week))
                .unwrap_or(0)
        })
        .sum();

    let daily_excess: u32 = daily_load
        .into_iter()
        .map(|((staff_id, _day), load)| {
            catalog
                .staff_by_id(staff_id)
                .map(|s| load.saturating_sub(s.max_sessions_per_day))
                .unwrap_or(0)
        })
        .sum();

    weekly_excess + daily_excess
}

/// Counts, per class per day, adjacent-slot pairs teaching the same
/// subject back to back — a crude proxy for "too much of one subject in a
/// row" that the distribution penalty discourages.
fn consecutive_same_subject_pairs(candidate: &Candidate) -> u32 {
    let mut by_class_day: HashMap<(ClassId, Weekday), Vec<(u8, &crate::types::SubjectId)>> =
        HashMap::new();
    for a in &candidate.assignments {
        by_class_day
            .entry((a.class_id.clone(), a.day))
            .or_default()
            .push((a.slot, &a.subject_id));
    }

    let mut pairs = 0u32;
    for mut slots in by_class_day.into_values() {
        slots.sort_by_key(|(slot, _)| *slot);
        for ((slot_a, subj_a), (slot_b, subj_b)) in slots.into_iter().tuple_windows() {
            if slot_b == slot_a + 1 && subj_a == subj_b {
                pairs += 1;
            }
        }
    }
    pairs
}
