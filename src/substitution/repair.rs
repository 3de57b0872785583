//! Conflict Repair (C8): detects double-bookings in a committed schedule
//! using the same first-seen-wins collision logic as the evaluator, then
//! tries to relocate each conflicting record in turn. One fix attempt per
//! record, no multi-step rearrangement — a record that can't be moved to a
//! single free alternative is reported unresolved.

use crate::catalog::CatalogSnapshot;
use crate::types::{RoomKind, ScheduleRecord, Weekday, WORKING_WEEK};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDimension {
    Staff,
    Room,
    Class,
}

#[derive(Debug, Clone)]
pub struct DetectedConflict {
    pub dimension: ConflictDimension,
    /// The record that lost the collision (second-or-later occupant of the
    /// key); repair tries moving this one first.
    pub record_id: String,
    /// The first-seen occupant of the colliding key; repair falls back to
    /// moving this one if `record_id` has no free alternative.
    pub other_record_id: String,
}

#[derive(Debug, Clone)]
pub struct RepairReport {
    pub resolved: Vec<String>,
    pub unresolved: Vec<String>,
}

/// Same collision-detection shape as `ga::evaluator::detect_conflicts`, but
/// over committed `ScheduleRecord`s (which carry an id) instead of
/// in-candidate `Assignment`s (which don't need one).
pub fn detect_conflicts(records: &[ScheduleRecord]) -> Vec<DetectedConflict> {
    let mut conflicts = Vec::new();
    record_collisions(
        records,
        |r| (r.staff_id.clone(), r.day, r.slot),
        ConflictDimension::Staff,
        &mut conflicts,
    );
    record_collisions(
        records,
        |r| (r.room_id.clone().0, r.day, r.slot),
        ConflictDimension::Room,
        &mut conflicts,
    );
    record_collisions(
        records,
        |r| (r.class_id.clone().0, r.day, r.slot),
        ConflictDimension::Class,
        &mut conflicts,
    );
    conflicts
}

fn record_collisions<K: std::hash::Hash + Eq>(
    records: &[ScheduleRecord],
    key_fn: impl Fn(&ScheduleRecord) -> K,
    dimension: ConflictDimension,
    out: &mut Vec<DetectedConflict>,
) {
    let mut seen: HashMap<K, String> = HashMap::new();
    for record in records {
        let key = key_fn(record);
        if let Some(first_id) = seen.get(&key) {
            out.push(DetectedConflict {
                dimension,
                record_id: record.id.clone(),
                other_record_id: first_id.clone(),
            });
        } else {
            seen.insert(key, record.id.clone());
        }
    }
}

fn slot_free_for(
    records: &[ScheduleRecord],
    day: Weekday,
    slot: u8,
    skip_id: &str,
    staff_id: &crate::types::StaffId,
    class_id: &crate::types::ClassId,
    room_id: &crate::types::RoomId,
) -> bool {
    !records.iter().any(|r| {
        r.id != skip_id
            && r.day == day
            && r.slot == slot
            && (&r.staff_id == staff_id || &r.class_id == class_id || &r.room_id == room_id)
    })
}

fn find_alternative_slot(records: &[ScheduleRecord], record: &ScheduleRecord) -> Option<(Weekday, u8)> {
    for &day in &WORKING_WEEK {
        for slot in 0..crate::types::SLOT_COUNT as u8 {
            if (day, slot) == (record.day, record.slot) {
                continue;
            }
            if slot_free_for(
                records,
                day,
                slot,
                &record.id,
                &record.staff_id,
                &record.class_id,
                &record.room_id,
            ) {
                return Some((day, slot));
            }
        }
    }
    None
}

fn find_alternative_room(
    catalog: &CatalogSnapshot,
    records: &[ScheduleRecord],
    record: &ScheduleRecord,
) -> Option<crate::types::RoomId> {
    let headcount = catalog.class_by_id(&record.class_id).map(|c| c.headcount).unwrap_or(0);
    let kind = if record.is_lab { RoomKind::Lab } else { RoomKind::Classroom };
    catalog
        .rooms_of_kind_with_capacity(kind, headcount)
        .into_iter()
        .find(|room| {
            room.id != record.room_id
                && !records
                    .iter()
                    .any(|r| r.id != record.id && r.room_id == room.id && r.day == record.day && r.slot == record.slot)
        })
        .map(|room| room.id.clone())
}

/// Resolves every detected conflict it can, one record at a time, and
/// reports what it could not fix. Mutates `records` in place.
pub fn auto_resolve_conflicts(catalog: &CatalogSnapshot, records: &mut Vec<ScheduleRecord>) -> RepairReport {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();

    let conflicts = detect_conflicts(records);
    for conflict in conflicts {
        // Try the losing record first, then the record it collided with —
        // one move succeeding is enough to call the conflict resolved.
        let mut fixed = false;
        for candidate_id in [&conflict.record_id, &conflict.other_record_id] {
            fixed = match conflict.dimension {
                ConflictDimension::Staff | ConflictDimension::Class => {
                    resolve_double_booking(records, candidate_id)
                }
                ConflictDimension::Room => resolve_room_conflict(catalog, records, candidate_id),
            };
            if fixed {
                break;
            }
        }

        if fixed {
            resolved.push(conflict.record_id);
        } else {
            unresolved.push(conflict.record_id);
        }
    }

    RepairReport { resolved, unresolved }
}

/// Staff and class double-booking share the same fix: move the record to
/// another slot free for its staff, class, and room all at once.
fn resolve_double_booking(records: &mut [ScheduleRecord], record_id: &str) -> bool {
    let record = match records.iter().find(|r| r.id == record_id) {
        Some(r) => r.clone(),
        None => return false,
    };

    if let Some((day, slot)) = find_alternative_slot(records, &record) {
        if let Some((start, end)) = crate::types::slot_times(slot) {
            if let Some(target) = records.iter_mut().find(|r| r.id == record_id) {
                target.day = day;
                target.slot = slot;
                target.start_time = start;
                target.end_time = end;
                return true;
            }
        }
    }
    false
}

fn resolve_room_conflict(catalog: &CatalogSnapshot, records: &mut [ScheduleRecord], record_id: &str) -> bool {
    let record = match records.iter().find(|r| r.id == record_id) {
        Some(r) => r.clone(),
        None => return false,
    };

    if let Some(room_id) = find_alternative_room(catalog, records, &record) {
        if let Some(target) = records.iter_mut().find(|r| r.id == record_id) {
            target.room_id = room_id;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::types::*;
    use chrono::NaiveTime;

    fn rec(id: &str, staff: &str, room: &str, class: &str, day: Weekday, slot: u8) -> ScheduleRecord {
        ScheduleRecord {
            id: id.into(),
            class_id: ClassId(class.into()),
            day,
            slot,
            subject_id: SubjectId("CS101".into()),
            staff_id: StaffId(staff.into()),
            room_id: RoomId(room.into()),
            is_lab: false,
            is_elective: false,
            week_number: 1,
            academic_year: "2026-27".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            original_staff_id: None,
        }
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::build(RawCatalog {
            staff: vec![],
            subjects: vec![],
            classes: vec![ClassSection {
                id: ClassId("C2".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 10,
                required_lectures: vec![],
                required_labs: vec![],
                electives: vec![],
                working_days: 6,
                slots_per_day: 8,
            }],
            rooms: vec![
                Room {
                    id: RoomId("R1".into()),
                    name: "101".into(),
                    kind: RoomKind::Classroom,
                    capacity: 60,
                    department: None,
                    active: true,
                },
                Room {
                    id: RoomId("R2".into()),
                    name: "102".into(),
                    kind: RoomKind::Classroom,
                    capacity: 60,
                    department: None,
                    active: true,
                },
            ],
            electives: vec![],
        })
        .unwrap()
    }

    #[test]
    fn detects_staff_double_booking() {
        let records = vec![
            rec("A", "S1", "R1", "C1", Weekday::Monday, 0),
            rec("B", "S1", "R2", "C2", Weekday::Monday, 0),
        ];
        let conflicts = detect_conflicts(&records);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].dimension, ConflictDimension::Staff);
    }

    #[test]
    fn resolves_staff_conflict_by_moving_second_record() {
        let catalog = catalog();
        let mut records = vec![
            rec("A", "S1", "R1", "C1", Weekday::Monday, 0),
            rec("B", "S1", "R2", "C2", Weekday::Monday, 0),
        ];
        let report = auto_resolve_conflicts(&catalog, &mut records);
        assert_eq!(report.unresolved.len(), 0);
        assert_eq!(detect_conflicts(&records).len(), 0);
    }

    #[test]
    fn resolves_room_conflict_with_alternative_room() {
        let catalog = catalog();
        let mut records = vec![
            rec("A", "S1", "R1", "C1", Weekday::Monday, 0),
            rec("B", "S2", "R1", "C2", Weekday::Monday, 0),
        ];
        let report = auto_resolve_conflicts(&catalog, &mut records);
        assert_eq!(report.unresolved.len(), 0);
        assert_eq!(detect_conflicts(&records).len(), 0);
    }
}
