use super::{ClassId, ElectiveId, StaffId, SubjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectiveSpec {
    pub id: ElectiveId,
    pub subject_id: SubjectId,
    pub offering_department: String,
    pub staff_id: StaffId,
    pub hours_per_week: u32,
    pub enrolled_classes: Vec<ClassId>,
    pub capacity: u32,
}
