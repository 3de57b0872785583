//! Initial-Solution Builder (C4): constructs one randomized candidate per
//! class, independently, then concatenates them. Placement tries to avoid
//! conflicts it can see locally (this class's own slots, the chosen
//! staff/room's own slots within the candidate built so far) but does not
//! look across classes being built in parallel — that's what the evaluator
//! and the GA's selection pressure are for.

use crate::catalog::{Capability, CatalogSnapshot};
use crate::types::{
    Assignment, Candidate, ClassSection, ElectiveSpec, RoomKind, SubjectId, Weekday, WORKING_WEEK,
};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

/// Reported when a required session could not be placed after exhausting
/// the local search attempts; the build continues regardless.
#[derive(Debug, Clone)]
pub struct UnplaceableSession {
    pub class_id: String,
    pub subject_id: String,
}

pub struct BuildReport {
    pub candidate: Candidate,
    pub unplaceable: Vec<UnplaceableSession>,
}

const PLACEMENT_ATTEMPTS: usize = 40;

pub fn build_population(
    catalog: &CatalogSnapshot,
    population_size: usize,
    rng: &mut impl Rng,
) -> Vec<Candidate> {
    (0..population_size)
        .map(|_| build_candidate(catalog, rng).candidate)
        .collect()
}

pub fn build_candidate(catalog: &CatalogSnapshot, rng: &mut impl Rng) -> BuildReport {
    let mut assignments = Vec::new();
    let mut unplaceable = Vec::new();

    for class in catalog.classes() {
        let mut occupied_slots: HashSet<(Weekday, u8)> = HashSet::new();

        for (subject_id, count) in &class.required_lectures {
            for _ in 0..*count {
                match place_lecture(catalog, class, subject_id, &occupied_slots, rng) {
                    Some(gene) => {
                        occupied_slots.insert((gene.day, gene.slot));
                        assignments.push(gene);
                    }
                    None => unplaceable.push(UnplaceableSession {
                        class_id: class.id.0.clone(),
                        subject_id: subject_id.0.clone(),
                    }),
                }
            }
        }

        for (subject_id, count) in &class.required_labs {
            let block = catalog
                .subject_by_id(subject_id)
                .map(|s| s.lab_block_length())
                .unwrap_or(2);
            for _ in 0..*count {
                match place_lab(catalog, class, subject_id, block, &occupied_slots, rng) {
                    Some(genes) => {
                        for gene in &genes {
                            occupied_slots.insert((gene.day, gene.slot));
                        }
                        assignments.extend(genes);
                    }
                    None => unplaceable.push(UnplaceableSession {
                        class_id: class.id.0.clone(),
                        subject_id: subject_id.0.clone(),
                    }),
                }
            }
        }

        for elective_id in &class.electives {
            let elective = match catalog.elective_by_id(elective_id) {
                Some(e) => e,
                None => continue,
            };
            for _ in 0..elective.hours_per_week {
                match place_elective(catalog, class, elective, &occupied_slots, rng) {
                    Some(gene) => {
                        occupied_slots.insert((gene.day, gene.slot));
                        assignments.push(gene);
                    }
                    None => unplaceable.push(UnplaceableSession {
                        class_id: class.id.0.clone(),
                        subject_id: elective.subject_id.0.clone(),
                    }),
                }
            }
        }
    }

    BuildReport {
        candidate: Candidate::new(assignments),
        unplaceable,
    }
}

pub(crate) fn working_days_slice(class: &ClassSection) -> &'static [Weekday] {
    let n = (class.working_days as usize).min(WORKING_WEEK.len());
    &WORKING_WEEK[..n]
}

fn random_free_slot(
    class: &ClassSection,
    occupied: &HashSet<(Weekday, u8)>,
    rng: &mut impl Rng,
) -> Option<(Weekday, u8)> {
    let days = working_days_slice(class);
    for _ in 0..PLACEMENT_ATTEMPTS {
        let day = *days.choose(rng)?;
        let slot = rng.gen_range(0..class.slots_per_day.max(1) as u8);
        if !occupied.contains(&(day, slot)) {
            return Some((day, slot));
        }
    }
    None
}

fn place_lecture(
    catalog: &CatalogSnapshot,
    class: &ClassSection,
    subject_id: &SubjectId,
    occupied: &HashSet<(Weekday, u8)>,
    rng: &mut impl Rng,
) -> Option<Assignment> {
    let staff_id = catalog
        .eligible_staff_for(subject_id, Capability::Lecture)
        .choose(rng)?
        .clone();
    let (day, slot) = random_free_slot(class, occupied, rng)?;
    let room_kind = RoomKind::Classroom;
    let room_id = catalog
        .rooms_of_kind_with_capacity(room_kind, class.headcount)
        .choose(rng)?
        .id
        .clone();

    Some(Assignment {
        class_id: class.id.clone(),
        day,
        slot,
        subject_id: subject_id.clone(),
        staff_id,
        room_id,
        is_lab: false,
        is_elective: false,
    })
}

/// Labs need `block` consecutive free slots on the same day — found by
/// first-fit scan over (day, starting slot) rather than uniform-random
/// sampling, since the consecutive-slots constraint makes blind random
/// retries unlikely to land on a valid block.
fn place_lab(
    catalog: &CatalogSnapshot,
    class: &ClassSection,
    subject_id: &SubjectId,
    block: u32,
    occupied: &HashSet<(Weekday, u8)>,
    rng: &mut impl Rng,
) -> Option<Vec<Assignment>> {
    let staff_id = catalog
        .eligible_staff_for(subject_id, Capability::Lab)
        .choose(rng)?
        .clone();
    // Lab rooms are chosen by kind only, not capacity — the source's
    // `_find_suitable_lab_room` never checks capacity there, unlike
    // `_find_suitable_room` for lectures/electives.
    let room_id = catalog
        .rooms_of_kind(RoomKind::Lab)
        .choose(rng)?
        .id
        .clone();

    let mut days = working_days_slice(class).to_vec();
    days.shuffle(rng);

    for day in days {
        for start in 0..=(class.slots_per_day as u8).saturating_sub(block as u8) {
            let slots: Vec<u8> = (start..start + block as u8).collect();
            if slots.iter().all(|s| !occupied.contains(&(day, *s))) {
                return Some(
                    slots
                        .into_iter()
                        .map(|slot| Assignment {
                            class_id: class.id.clone(),
                            day,
                            slot,
                            subject_id: subject_id.clone(),
                            staff_id: staff_id.clone(),
                            room_id: room_id.clone(),
                            is_lab: true,
                            is_elective: false,
                        })
                        .collect(),
                );
            }
        }
    }
    None
}

/// Electives are placed like lectures except the staff is fixed: the
/// elective's pre-assigned instructor, not a uniform choice over an
/// eligible set. Only a room is searched.
fn place_elective(
    catalog: &CatalogSnapshot,
    class: &ClassSection,
    elective: &ElectiveSpec,
    occupied: &HashSet<(Weekday, u8)>,
    rng: &mut impl Rng,
) -> Option<Assignment> {
    let (day, slot) = random_free_slot(class, occupied, rng)?;
    let room_id = catalog
        .rooms_of_kind_with_capacity(RoomKind::Classroom, class.headcount)
        .choose(rng)?
        .id
        .clone();

    Some(Assignment {
        class_id: class.id.clone(),
        day,
        slot,
        subject_id: elective.subject_id.clone(),
        staff_id: elective.staff_id.clone(),
        room_id,
        is_lab: false,
        is_elective: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::types::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet as Set;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::build(RawCatalog {
            staff: vec![StaffProfile {
                id: StaffId("S1".into()),
                name: "A".into(),
                department: "CSE".into(),
                rank: Rank::Lecturer,
                email: "a@x.edu".into(),
                max_sessions_per_day: 6,
                max_sessions_per_week: 30,
                teaches_lecture: Set::from([SubjectId("CS101".into())]),
                teaches_lab: Set::new(),
                teaches_elective: Set::new(),
                absent_dates: vec![],
            }],
            subjects: vec![SubjectSpec {
                id: SubjectId("CS101".into()),
                name: "Intro".into(),
                kind: SubjectKind::Core,
                department: "CSE".into(),
                semester: 1,
                credits: 3,
                hours_per_week: 3,
                is_lab: false,
                lab_block_length: 1,
            }],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 50,
                required_lectures: vec![(SubjectId("CS101".into()), 3)],
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
    fn places_all_required_lectures_when_feasible() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        let report = build_candidate(&catalog, &mut rng);
        assert_eq!(report.candidate.assignments.len(), 3);
        assert!(report.unplaceable.is_empty());
    }

    #[test]
    fn never_double_books_the_class_within_one_build() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        let report = build_candidate(&catalog, &mut rng);
        let mut seen = Set::new();
        for a in &report.candidate.assignments {
            assert!(seen.insert((a.day, a.slot)));
        }
    }

    #[test]
    fn places_electives_with_the_preassigned_staff() {
        let mut raw = RawCatalog {
            staff: vec![StaffProfile {
                id: StaffId("S1".into()),
                name: "A".into(),
                department: "CSE".into(),
                rank: Rank::Lecturer,
                email: "a@x.edu".into(),
                max_sessions_per_day: 6,
                max_sessions_per_week: 30,
                teaches_lecture: Set::from([SubjectId("CS101".into())]),
                teaches_lab: Set::new(),
                teaches_elective: Set::new(),
                absent_dates: vec![],
            }],
            subjects: vec![SubjectSpec {
                id: SubjectId("CS101".into()),
                name: "Intro".into(),
                kind: SubjectKind::Core,
                department: "CSE".into(),
                semester: 1,
                credits: 3,
                hours_per_week: 3,
                is_lab: false,
                lab_block_length: 1,
            }],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 50,
                required_lectures: vec![(SubjectId("CS101".into()), 3)],
                required_labs: vec![],
                electives: vec![ElectiveId("E1".into())],
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
            electives: vec![ElectiveSpec {
                id: ElectiveId("E1".into()),
                subject_id: SubjectId("EL101".into()),
                offering_department: "CSE".into(),
                staff_id: StaffId("S1".into()),
                hours_per_week: 2,
                enrolled_classes: vec![ClassId("C1".into())],
                capacity: 60,
            }],
        };
        raw.staff[0].teaches_elective.insert(SubjectId("EL101".into()));
        let catalog = CatalogSnapshot::build(raw).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        let report = build_candidate(&catalog, &mut rng);

        let elective_genes: Vec<_> = report
            .candidate
            .assignments
            .iter()
            .filter(|a| a.is_elective)
            .collect();
        assert_eq!(elective_genes.len(), 2);
        assert!(elective_genes.iter().all(|a| a.staff_id == StaffId("S1".into())));
        assert_eq!(report.candidate.assignments.len(), 5);
    }

    /// Scenario A's literal setup: a lab room with capacity (30) well below
    /// the class's headcount (60). The lab must still be placed — labs are
    /// chosen by room kind only, never filtered by capacity.
    #[test]
    fn places_lab_in_undersized_lab_room() {
        let raw = RawCatalog {
            staff: vec![StaffProfile {
                id: StaffId("S1".into()),
                name: "A".into(),
                department: "CSE".into(),
                rank: Rank::Lecturer,
                email: "a@x.edu".into(),
                max_sessions_per_day: 6,
                max_sessions_per_week: 30,
                teaches_lecture: Set::new(),
                teaches_lab: Set::from([SubjectId("CS101L".into())]),
                teaches_elective: Set::new(),
                absent_dates: vec![],
            }],
            subjects: vec![SubjectSpec {
                id: SubjectId("CS101L".into()),
                name: "Intro Lab".into(),
                kind: SubjectKind::Lab,
                department: "CSE".into(),
                semester: 1,
                credits: 1,
                hours_per_week: 2,
                is_lab: true,
                lab_block_length: 2,
            }],
            classes: vec![ClassSection {
                id: ClassId("C1".into()),
                year: 1,
                section: "A".into(),
                department: "CSE".into(),
                headcount: 60,
                required_lectures: vec![],
                required_labs: vec![(SubjectId("CS101L".into()), 1)],
                electives: vec![],
                working_days: 5,
                slots_per_day: 8,
            }],
            rooms: vec![Room {
                id: RoomId("LAB1".into()),
                name: "Lab 1".into(),
                kind: RoomKind::Lab,
                capacity: 30,
                department: None,
                active: true,
            }],
            electives: vec![],
        };
        let catalog = CatalogSnapshot::build(raw).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let report = build_candidate(&catalog, &mut rng);

        assert!(report.unplaceable.is_empty());
        assert_eq!(report.candidate.assignments.len(), 2);
        assert!(report.candidate.assignments.iter().all(|a| a.room_id == RoomId("LAB1".into())));
    }
}
