use super::{StaffId, SubjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Academic rank, used both as a tie-break in substitute scoring and for
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Professor,
    AssociateProfessor,
    AssistantProfessor,
    Lecturer,
    VisitingFaculty,
}

impl Rank {
    /// Fixed scoring table used by the substitute finder (higher is better).
    pub fn substitute_score(self) -> f64 {
        match self {
            Rank::Professor => 25.0,
            Rank::AssociateProfessor => 20.0,
            Rank::AssistantProfessor => 15.0,
            Rank::Lecturer => 10.0,
            Rank::VisitingFaculty => 5.0,
        }
    }
}

/// A member of teaching staff and what they are allowed to teach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: StaffId,
    pub name: String,
    pub department: String,
    pub rank: Rank,
    pub email: String,
    pub max_sessions_per_day: u32,
    pub max_sessions_per_week: u32,
    pub teaches_lecture: HashSet<SubjectId>,
    pub teaches_lab: HashSet<SubjectId>,
    pub teaches_elective: HashSet<SubjectId>,
    pub absent_dates: Vec<NaiveDate>,
}

impl StaffProfile {
    pub fn is_absent_on(&self, date: NaiveDate) -> bool {
        self.absent_dates.contains(&date)
    }

    pub fn can_teach_lecture(&self, subject: &SubjectId) -> bool {
        self.teaches_lecture.contains(subject)
    }

    pub fn can_teach_lab(&self, subject: &SubjectId) -> bool {
        self.teaches_lab.contains(subject)
    }

    pub fn can_teach_elective(&self, subject: &SubjectId) -> bool {
        self.teaches_elective.contains(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> StaffProfile {
        StaffProfile {
            id: StaffId("S1".into()),
            name: "A. Rao".into(),
            department: "CSE".into(),
            rank: Rank::AssistantProfessor,
            email: "a.rao@example.edu".into(),
            max_sessions_per_day: 4,
            max_sessions_per_week: 18,
            teaches_lecture: [SubjectId("CS101".into())].into_iter().collect(),
            teaches_lab: HashSet::new(),
            teaches_elective: HashSet::new(),
            absent_dates: vec![NaiveDate::from_ymd_opt(2026, 7, 28).unwrap()],
        }
    }

    #[test]
    fn absence_lookup() {
        let s = staff();
        assert!(s.is_absent_on(NaiveDate::from_ymd_opt(2026, 7, 28).unwrap()));
        assert!(!s.is_absent_on(NaiveDate::from_ymd_opt(2026, 7, 29).unwrap()));
    }

    #[test]
    fn capability_lookup() {
        let s = staff();
        assert!(s.can_teach_lecture(&SubjectId("CS101".into())));
        assert!(!s.can_teach_lab(&SubjectId("CS101".into())));
    }
}
