use super::{ClassId, RoomId, StaffId, SubjectId, Weekday};
use serde::{Deserialize, Serialize};

/// A single gene: one class's occupation of one slot by one subject,
/// staffed and roomed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub class_id: ClassId,
    pub day: Weekday,
    pub slot: u8,
    pub subject_id: SubjectId,
    pub staff_id: StaffId,
    pub room_id: RoomId,
    pub is_lab: bool,
    pub is_elective: bool,
}

impl Assignment {
    /// The key collisions are detected on: two assignments sharing this key
    /// mean the same class is double-booked in the same slot.
    pub fn class_slot_key(&self) -> (ClassId, Weekday, u8) {
        (self.class_id.clone(), self.day, self.slot)
    }

    pub fn staff_slot_key(&self) -> (StaffId, Weekday, u8) {
        (self.staff_id.clone(), self.day, self.slot)
    }

    pub fn room_slot_key(&self) -> (RoomId, Weekday, u8) {
        (self.room_id.clone(), self.day, self.slot)
    }
}

/// A candidate timetable: the GA's chromosome. A contiguous `Vec` of
/// assignments, indexed by position rather than linked by pointer, so
/// crossover and mutation are plain slice operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Candidate {
    pub assignments: Vec<Assignment>,
    #[serde(skip)]
    fitness_cache: Option<f64>,
}

impl Candidate {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Candidate {
            assignments,
            fitness_cache: None,
        }
    }

    pub fn cached_fitness(&self) -> Option<f64> {
        self.fitness_cache
    }

    pub fn set_cached_fitness(&mut self, fitness: f64) {
        self.fitness_cache = Some(fitness);
    }

    /// Every mutating operation (crossover child construction, mutation,
    /// repair) must go through this so a stale fitness is never read back.
    pub fn invalidate(&mut self) {
        self.fitness_cache = None;
    }

    pub fn assignments_for_class<'a>(&'a self, class_id: &'a ClassId) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| &a.class_id == class_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn invalidate_clears_cache() {
        let mut c = Candidate::new(vec![gene("C1", Weekday::Monday, 0)]);
        c.set_cached_fitness(87.5);
        assert_eq!(c.cached_fitness(), Some(87.5));
        c.invalidate();
        assert_eq!(c.cached_fitness(), None);
    }

    #[test]
    fn class_slot_key_identifies_double_booking() {
        let a = gene("C1", Weekday::Monday, 0);
        let b = gene("C1", Weekday::Monday, 0);
        assert_eq!(a.class_slot_key(), b.class_slot_key());
    }
}
