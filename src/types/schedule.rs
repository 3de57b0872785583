use super::{ClassId, RoomId, StaffId, SubjectId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of week. Typed explicitly rather than as a raw index so that slot
/// arithmetic and serialization cannot silently disagree on what `0` means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub const WORKING_WEEK: [Weekday; 6] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    pub fn index(self) -> usize {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        WORKING_WEEK.get(i).copied()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The institution's fixed daily slot grid: 8 slots, same wall-clock times
/// every day. Duplicated in no other module — everything that needs a
/// slot's start/end time looks it up here.
pub const SLOT_COUNT: usize = 8;

pub fn slot_times(slot: u8) -> Option<(NaiveTime, NaiveTime)> {
    const TABLE: [(u32, u32, u32, u32); SLOT_COUNT] = [
        (9, 0, 10, 0),
        (10, 0, 11, 0),
        (11, 15, 12, 15),
        (12, 15, 13, 15),
        (14, 0, 15, 0),
        (15, 0, 16, 0),
        (16, 15, 17, 15),
        (17, 15, 18, 15),
    ];
    TABLE.get(slot as usize).map(|&(sh, sm, eh, em)| {
        (
            NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        )
    })
}

/// `slot_times` for any slot this crate ever constructs an `Assignment`
/// with; falls back to slot 0's times for a value outside the fixed grid
/// rather than panicking in caller code.
pub fn slot_times_or_default(slot: u8) -> (NaiveTime, NaiveTime) {
    slot_times(slot).unwrap_or_else(|| slot_times(0).unwrap())
}

/// A single committed, timestamped slot occupation — what actually gets
/// persisted once a candidate timetable is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: String,
    pub class_id: ClassId,
    pub day: Weekday,
    pub slot: u8,
    pub subject_id: SubjectId,
    pub staff_id: StaffId,
    pub room_id: RoomId,
    pub is_lab: bool,
    pub is_elective: bool,
    pub week_number: u32,
    pub academic_year: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Set once a substitution has been applied in place of the originally
    /// scheduled staff member.
    pub original_staff_id: Option<StaffId>,
}

impl ScheduleRecord {
    pub fn is_substitute(&self) -> bool {
        self.original_staff_id.is_some()
    }
}

/// A proposed or approved stand-in for a `ScheduleRecord` whose original
/// staff member is unavailable on `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionRecord {
    pub id: String,
    pub schedule_record_id: String,
    pub substitute_staff_id: StaffId,
    pub date: NaiveDate,
    pub reason: String,
    pub approved: bool,
    pub approved_by: Option<String>,
}
