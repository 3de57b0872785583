//! GA Operators (C5): selection, crossover, and mutation. Every operator
//! takes its own `&mut impl Rng` rather than touching a shared/global
//! source, so the driver can hand out independent child streams per
//! component and keep the whole run reproducible from one seed.

use crate::catalog::{Capability, CatalogSnapshot};
use crate::types::{Candidate, ClassId, RoomKind};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Picks the fittest of `tournament_size` uniformly-random contestants.
/// `fitness_of` is expected to be a cheap cached lookup, not a re-evaluation.
pub fn tournament_select<'a>(
    population: &'a [Candidate],
    fitness_of: &[f64],
    tournament_size: usize,
    rng: &mut impl Rng,
) -> &'a Candidate {
    let mut best_index = rng.gen_range(0..population.len());
    for _ in 1..tournament_size {
        let challenger = rng.gen_range(0..population.len());
        if fitness_of[challenger] > fitness_of[best_index] {
            best_index = challenger;
        }
    }
    &population[best_index]
}

/// Crossover partitions the set of class ids into two halves and produces a
/// complementary pair of children: child A takes the first half's genes
/// from parent A and the second half's from parent B; child B gets the
/// complement. Partitioning by whole class (never splitting a class's own
/// genes across parents) localizes any disruption to cross-class resource
/// conflicts rather than crossover itself inventing a same-class clash.
/// With probability `1 - rate` both children are deep copies of their
/// respective parent instead.
pub fn crossover(
    parent_a: &Candidate,
    parent_b: &Candidate,
    rate: f64,
    rng: &mut impl Rng,
) -> (Candidate, Candidate) {
    if rng.gen::<f64>() > rate {
        return (parent_a.clone(), parent_b.clone());
    }

    let mut classes: Vec<ClassId> = parent_a
        .assignments
        .iter()
        .map(|a| a.class_id.clone())
        .chain(parent_b.assignments.iter().map(|a| a.class_id.clone()))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    classes.sort_by(|a, b| a.0.cmp(&b.0));

    // Partition into two halves with a shuffle, but keep assembling the
    // children in the deterministic sorted order above — iterating a
    // `HashSet` here would let the process-randomized hasher leak into the
    // children's gene order even with a seeded `rng`.
    let mut shuffled = classes.clone();
    shuffled.shuffle(rng);
    let half = shuffled.len() / 2;
    let first_half: HashSet<ClassId> = shuffled.into_iter().take(half).collect();

    let genes_for = |class_id: &ClassId, from: &Candidate| -> Vec<crate::types::Assignment> {
        from.assignments
            .iter()
            .filter(|a| &a.class_id == class_id)
            .cloned()
            .collect()
    };

    let mut child_a = Vec::new();
    let mut child_b = Vec::new();
    for class_id in &classes {
        if first_half.contains(class_id) {
            child_a.extend(genes_for(class_id, parent_a));
            child_b.extend(genes_for(class_id, parent_b));
        } else {
            child_a.extend(genes_for(class_id, parent_b));
            child_b.extend(genes_for(class_id, parent_a));
        }
    }

    (Candidate::new(child_a), Candidate::new(child_b))
}

#[derive(Debug, Clone, Copy)]
enum MutationKind {
    RestaffSession,
    RerootSession,
    ReslotSession,
}

/// With probability `rate`, picks one uniformly-random gene in the
/// candidate and applies exactly one of the three mutation kinds
/// (uniformly chosen) to it. Otherwise the candidate is left untouched.
pub fn mutate(candidate: &mut Candidate, catalog: &CatalogSnapshot, rate: f64, rng: &mut impl Rng) {
    if candidate.assignments.is_empty() || rng.gen::<f64>() > rate {
        return;
    }

    let index = rng.gen_range(0..candidate.assignments.len());
    let kind = [
        MutationKind::RestaffSession,
        MutationKind::RerootSession,
        MutationKind::ReslotSession,
    ]
    .choose(rng)
    .copied()
    .unwrap();

    match kind {
        MutationKind::RestaffSession => mutate_staff(candidate, catalog, index, rng),
        MutationKind::RerootSession => mutate_room(candidate, catalog, index, rng),
        MutationKind::ReslotSession => mutate_slot(candidate, catalog, index, rng),
    }
    candidate.invalidate();
}

fn mutate_staff(candidate: &mut Candidate, catalog: &CatalogSnapshot, index: usize, rng: &mut impl Rng) {
    let (subject_id, is_lab, is_elective) = {
        let a = &candidate.assignments[index];
        (a.subject_id.clone(), a.is_lab, a.is_elective)
    };
    // An elective's instructor is fixed by the catalog, not drawn from an
    // eligible-staff pool, so re-staffing one is a no-op.
    if is_elective {
        return;
    }
    let capability = if is_lab { Capability::Lab } else { Capability::Lecture };
    if let Some(staff_id) = catalog.eligible_staff_for(&subject_id, capability).choose(rng) {
        candidate.assignments[index].staff_id = staff_id.clone();
    }
}

fn mutate_room(candidate: &mut Candidate, catalog: &CatalogSnapshot, index: usize, rng: &mut impl Rng) {
    let (is_lab, headcount) = {
        let a = &candidate.assignments[index];
        let headcount = catalog
            .class_by_id(&a.class_id)
            .map(|c| c.headcount)
            .unwrap_or(0);
        (a.is_lab, headcount)
    };
    let kind = if is_lab { RoomKind::Lab } else { RoomKind::Classroom };
    if let Some(room) = catalog.rooms_of_kind_with_capacity(kind, headcount).choose(rng) {
        candidate.assignments[index].room_id = room.id.clone();
    }
}

/// Re-slots within the class's own working days and slots-per-day, per the
/// class that owns this gene (not the fixed maximum week shape) — no
/// consecutive-block re-check, so a lab gene may end up fragmented; the
/// evaluator penalizes the resulting conflict rather than this rejecting it.
fn mutate_slot(candidate: &mut Candidate, catalog: &CatalogSnapshot, index: usize, rng: &mut impl Rng) {
    let class_id = candidate.assignments[index].class_id.clone();
    let Some(class) = catalog.class_by_id(&class_id) else {
        return;
    };
    let Some(&day) = crate::ga::builder::working_days_slice(class).choose(rng) else {
        return;
    };
    if class.slots_per_day == 0 {
        return;
    }
    candidate.assignments[index].day = day;
    candidate.assignments[index].slot = rng.gen_range(0..class.slots_per_day as u8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use crate::types::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet as Set;

    fn gene(class: &str, day: Weekday, slot: u8) -> Assignment {
        Assignment {
            class_id: ClassId(class.into()),
            day,
            slot,
            subject_id: SubjectId("CS101".into()),
            staff_id: StaffId("S1".into()),
            room_id: RoomId("R1".into()),
            is_lab: false,
            is_elective: false,
        }
    }

    #[test]
    fn crossover_keeps_each_class_whole() {
        let a = Candidate::new(vec![gene("C1", Weekday::Monday, 0), gene("C2", Weekday::Tuesday, 1)]);
        let b = Candidate::new(vec![gene("C1", Weekday::Wednesday, 2), gene("C2", Weekday::Thursday, 3)]);
        let mut rng = SmallRng::seed_from_u64(1);
        let (child_a, child_b) = crossover(&a, &b, 1.0, &mut rng);

        for child in [&child_a, &child_b] {
            let c1_days: Set<_> = child
                .assignments
                .iter()
                .filter(|g| g.class_id == ClassId("C1".into()))
                .map(|g| g.day)
                .collect();
            assert_eq!(c1_days.len(), 1);
        }
    }

    #[test]
    fn crossover_children_are_complementary() {
        let a = Candidate::new(vec![gene("C1", Weekday::Monday, 0), gene("C2", Weekday::Tuesday, 1)]);
        let b = Candidate::new(vec![gene("C1", Weekday::Wednesday, 2), gene("C2", Weekday::Thursday, 3)]);
        let mut rng = SmallRng::seed_from_u64(2);
        let (child_a, child_b) = crossover(&a, &b, 1.0, &mut rng);

        // whatever child A took from a parent for a class, child B took the other parent's genes
        for g in &child_a.assignments {
            let from_a = a.assignments.contains(g);
            let counterpart_in_b = child_b
                .assignments
                .iter()
                .find(|h| h.class_id == g.class_id)
                .unwrap();
            if from_a {
                assert!(b.assignments.contains(counterpart_in_b));
            } else {
                assert!(a.assignments.contains(counterpart_in_b));
            }
        }
    }

    #[test]
    fn zero_rate_crossover_returns_parents_unchanged() {
        let a = Candidate::new(vec![gene("C1", Weekday::Monday, 0)]);
        let b = Candidate::new(vec![gene("C1", Weekday::Tuesday, 1)]);
        let mut rng = SmallRng::seed_from_u64(1);
        let (child_a, child_b) = crossover(&a, &b, 0.0, &mut rng);
        assert_eq!(child_a.assignments, a.assignments);
        assert_eq!(child_b.assignments, b.assignments);
    }

    #[test]
    fn tournament_select_prefers_higher_fitness() {
        let pop = vec![
            Candidate::new(vec![gene("C1", Weekday::Monday, 0)]),
            Candidate::new(vec![gene("C1", Weekday::Monday, 0)]),
        ];
        let fitness = vec![10.0, 90.0];
        let mut rng = SmallRng::seed_from_u64(3);
        let mut picked_high = false;
        for _ in 0..20 {
            let chosen = tournament_select(&pop, &fitness, 2, &mut rng);
            if chosen.assignments == pop[1].assignments {
                picked_high = true;
            }
        }
        assert!(picked_high);
    }

    fn empty_catalog() -> CatalogSnapshot {
        CatalogSnapshot::build(RawCatalog {
            staff: vec![],
            subjects: vec![],
            classes: vec![],
            rooms: vec![],
            electives: vec![],
        })
        .unwrap()
    }

    #[test]
    fn mutation_invalidates_fitness_cache() {
        let catalog = empty_catalog();
        let mut c = Candidate::new(vec![gene("C1", Weekday::Monday, 0)]);
        c.set_cached_fitness(50.0);
        let mut rng = SmallRng::seed_from_u64(5);
        mutate(&mut c, &catalog, 1.0, &mut rng);
        assert_eq!(c.cached_fitness(), None);
    }
}
