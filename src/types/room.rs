use super::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Classroom,
    Lab,
    SeminarHall,
    Auditorium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub kind: RoomKind,
    pub capacity: u32,
    /// Rooms may be pinned to a department; `None` means shared/general use.
    pub department: Option<String>,
    pub active: bool,
}

impl Room {
    pub fn fits(&self, headcount: u32) -> bool {
        self.active && self.capacity >= headcount
    }

    pub fn compatible_with(&self, needs_lab: bool) -> bool {
        if needs_lab {
            self.kind == RoomKind::Lab
        } else {
            self.kind != RoomKind::Lab
        }
    }
}
