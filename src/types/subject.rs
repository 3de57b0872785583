use super::SubjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Core,
    Elective,
    Lab,
    Project,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSpec {
    pub id: SubjectId,
    pub name: String,
    pub kind: SubjectKind,
    pub department: String,
    pub semester: u32,
    pub credits: u32,
    pub hours_per_week: u32,
    pub is_lab: bool,
    /// Number of consecutive slots a single lab session occupies.
    pub lab_block_length: u32,
}

impl SubjectSpec {
    pub fn lab_block_length(&self) -> u32 {
        if self.is_lab {
            self.lab_block_length.max(1)
        } else {
            1
        }
    }
}
