use super::{ClassId, ElectiveId, SubjectId};
use serde::{Deserialize, Serialize};

/// A single cohort of students that moves through the week together
/// (e.g. "CSE 3rd year Section B").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: ClassId,
    pub year: u32,
    pub section: String,
    pub department: String,
    pub headcount: u32,
    /// (subject, lectures required per week)
    pub required_lectures: Vec<(SubjectId, u32)>,
    /// (subject, lab sessions required per week)
    pub required_labs: Vec<(SubjectId, u32)>,
    pub electives: Vec<ElectiveId>,
    pub working_days: u32,
    pub slots_per_day: u32,
}

impl ClassSection {
    pub fn total_required_hours(&self) -> u32 {
        let lecture_hours: u32 = self.required_lectures.iter().map(|(_, n)| n).sum();
        let lab_hours: u32 = self.required_labs.iter().map(|(_, n)| n).sum();
        lecture_hours + lab_hours + self.electives.len() as u32
    }

    pub fn capacity_slots(&self) -> u32 {
        self.working_days * self.slots_per_day
    }
}
