//! The read-only catalog snapshot (C1): every entity the scheduler and
//! substitution engine need, plus the indexes that save the builder and
//! finder from re-scanning the whole catalog on every lookup.

use crate::error::Result;
use crate::types::{
    ClassId, ClassSection, ElectiveId, ElectiveSpec, Room, RoomId, RoomKind, StaffId,
    StaffProfile, SubjectId, SubjectSpec,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RawCatalog {
    pub staff: Vec<StaffProfile>,
    pub subjects: Vec<SubjectSpec>,
    pub classes: Vec<ClassSection>,
    pub rooms: Vec<Room>,
    pub electives: Vec<ElectiveSpec>,
}

/// Which capability set a subject lookup should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Lecture,
    Lab,
    Elective,
}

pub struct CatalogSnapshot {
    staff: Vec<StaffProfile>,
    subjects: Vec<SubjectSpec>,
    classes: Vec<ClassSection>,
    rooms: Vec<Room>,
    electives: Vec<ElectiveSpec>,

    staff_by_id: HashMap<StaffId, usize>,
    subject_by_id: HashMap<SubjectId, usize>,
    class_by_id: HashMap<ClassId, usize>,
    room_by_id: HashMap<RoomId, usize>,
    elective_by_id: HashMap<ElectiveId, usize>,

    eligible_staff: HashMap<(SubjectId, Capability), Vec<StaffId>>,
    rooms_by_kind: HashMap<RoomKind, Vec<RoomId>>,
}

impl CatalogSnapshot {
    /// Builds the snapshot from raw entities, validating referential
    /// consistency up front. This is the only place `CatalogConsistency`
    /// errors originate.
    pub fn build(raw: RawCatalog) -> Result<Self> {
        crate::parser::validation::validate_catalog(&raw)?;

        let staff_by_id = index_by(&raw.staff, |s| s.id.clone());
        let subject_by_id = index_by(&raw.subjects, |s| s.id.clone());
        let class_by_id = index_by(&raw.classes, |c| c.id.clone());
        let room_by_id = index_by(&raw.rooms, |r| r.id.clone());
        let elective_by_id = index_by(&raw.electives, |e| e.id.clone());

        let mut eligible_staff: HashMap<(SubjectId, Capability), Vec<StaffId>> = HashMap::new();
        for s in &raw.staff {
            for subj in &s.teaches_lecture {
                eligible_staff
                    .entry((subj.clone(), Capability::Lecture))
                    .or_default()
                    .push(s.id.clone());
            }
            for subj in &s.teaches_lab {
                eligible_staff
                    .entry((subj.clone(), Capability::Lab))
                    .or_default()
                    .push(s.id.clone());
            }
            for subj in &s.teaches_elective {
                eligible_staff
                    .entry((subj.clone(), Capability::Elective))
                    .or_default()
                    .push(s.id.clone());
            }
        }

        let mut rooms_by_kind: HashMap<RoomKind, Vec<RoomId>> = HashMap::new();
        for r in raw.rooms.iter().filter(|r| r.active) {
            rooms_by_kind.entry(r.kind).or_default().push(r.id.clone());
        }

        Ok(CatalogSnapshot {
            staff: raw.staff,
            subjects: raw.subjects,
            classes: raw.classes,
            rooms: raw.rooms,
            electives: raw.electives,
            staff_by_id,
            subject_by_id,
            class_by_id,
            room_by_id,
            elective_by_id,
            eligible_staff,
            rooms_by_kind,
        })
    }

    pub fn staff(&self) -> &[StaffProfile] {
        &self.staff
    }

    pub fn subjects(&self) -> &[SubjectSpec] {
        &self.subjects
    }

    pub fn classes(&self) -> &[ClassSection] {
        &self.classes
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn electives(&self) -> &[ElectiveSpec] {
        &self.electives
    }

    pub fn staff_by_id(&self, id: &StaffId) -> Option<&StaffProfile> {
        self.staff_by_id.get(id).map(|&i| &self.staff[i])
    }

    pub fn subject_by_id(&self, id: &SubjectId) -> Option<&SubjectSpec> {
        self.subject_by_id.get(id).map(|&i| &self.subjects[i])
    }

    pub fn class_by_id(&self, id: &ClassId) -> Option<&ClassSection> {
        self.class_by_id.get(id).map(|&i| &self.classes[i])
    }

    pub fn room_by_id(&self, id: &RoomId) -> Option<&Room> {
        self.room_by_id.get(id).map(|&i| &self.rooms[i])
    }

    pub fn elective_by_id(&self, id: &ElectiveId) -> Option<&ElectiveSpec> {
        self.elective_by_id.get(id).map(|&i| &self.electives[i])
    }

    /// Staff eligible to teach `subject` under `capability`, precomputed at
    /// snapshot build time instead of linear-scanned per call.
    pub fn eligible_staff_for(&self, subject: &SubjectId, capability: Capability) -> &[StaffId] {
        self.eligible_staff
            .get(&(subject.clone(), capability))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = &Room> {
        self.rooms_by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.room_by_id(id))
    }

    pub fn rooms_of_kind_with_capacity(&self, kind: RoomKind, min_capacity: u32) -> Vec<&Room> {
        self.rooms_of_kind(kind)
            .filter(|r| r.capacity >= min_capacity)
            .collect()
    }
}

fn index_by<T, K: std::hash::Hash + Eq>(items: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize> {
    items.iter().enumerate().map(|(i, t)| (key(t), i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rank, RoomKind};
    use std::collections::HashSet;

    fn sample() -> RawCatalog {
        RawCatalog {
            staff: vec![StaffProfile {
                id: StaffId("S1".into()),
                name: "A".into(),
                department: "CSE".into(),
                rank: Rank::Lecturer,
                email: "a@x.edu".into(),
                max_sessions_per_day: 4,
                max_sessions_per_week: 18,
                teaches_lecture: HashSet::from([SubjectId("CS101".into())]),
                teaches_lab: HashSet::new(),
                teaches_elective: HashSet::new(),
                absent_dates: vec![],
            }],
            subjects: vec![SubjectSpec {
                id: SubjectId("CS101".into()),
                name: "Intro".into(),
                kind: crate::types::SubjectKind::Core,
                department: "CSE".into(),
                semester: 1,
                credits: 3,
                hours_per_week: 3,
                is_lab: false,
                lab_block_length: 1,
            }],
            classes: vec![],
            rooms: vec![Room {
                id: RoomId("R1".into()),
                name: "101".into(),
                kind: RoomKind::Classroom,
                capacity: 60,
                department: None,
                active: true,
            }],
            electives: vec![],
        }
    }

    #[test]
    fn eligible_staff_index_finds_lecturer() {
        let snap = CatalogSnapshot::build(sample()).unwrap();
        let eligible = snap.eligible_staff_for(&SubjectId("CS101".into()), Capability::Lecture);
        assert_eq!(eligible, &[StaffId("S1".into())]);
    }

    #[test]
    fn room_capacity_index_filters() {
        let snap = CatalogSnapshot::build(sample()).unwrap();
        assert_eq!(snap.rooms_of_kind_with_capacity(RoomKind::Classroom, 100).len(), 0);
        assert_eq!(snap.rooms_of_kind_with_capacity(RoomKind::Classroom, 50).len(), 1);
    }
}
