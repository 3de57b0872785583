//! Catalog/Store Ports (C9): narrow trait boundaries standing in for the
//! external persistence collaborator. Nothing in `ga`, `substitution`, or
//! `catalog` talks to a file or a database directly — they go through
//! these traits, so a real store can be swapped in without touching
//! scheduling logic.

pub mod memory;

use crate::catalog::RawCatalog;
use crate::error::Result;
use crate::types::{ScheduleRecord, StaffId, SubstitutionRecord};
use chrono::NaiveDate;

/// Read access to the entity catalog (staff, subjects, classes, rooms,
/// electives) a real deployment would back with a database.
pub trait CatalogPort: Send + Sync {
    fn load(&self) -> Result<RawCatalog>;
}

/// Read/write access to committed schedule records and substitutions.
pub trait SchedulePort: Send + Sync {
    fn committed_records(&self) -> Result<Vec<ScheduleRecord>>;
    fn record_by_id(&self, id: &str) -> Result<Option<ScheduleRecord>>;
    fn commit(&self, records: Vec<ScheduleRecord>) -> Result<()>;
    fn replace_record(&self, record: ScheduleRecord) -> Result<()>;
    fn append_substitution(&self, substitution: SubstitutionRecord) -> Result<()>;
    /// Sets a pending `SubstitutionRecord`'s approval flag; the record
    /// itself is otherwise append-only.
    fn approve_substitution(&self, substitution_id: &str, approver: &str) -> Result<()>;
    fn substitutions_for_staff_on(
        &self,
        staff_id: &StaffId,
        date: NaiveDate,
    ) -> Result<Vec<SubstitutionRecord>>;
}
