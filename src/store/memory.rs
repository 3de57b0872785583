//! In-memory reference implementation of the store ports, used by the demo
//! CLI path and by tests. A real deployment backs `SchedulePort` with a
//! database; this is the testable stand-in spec.md's Non-goals keep out of
//! scope for this crate.

use super::{CatalogPort, SchedulePort};
use crate::catalog::RawCatalog;
use crate::error::Result;
use crate::types::{ScheduleRecord, StaffId, SubstitutionRecord};
use chrono::NaiveDate;
use std::sync::Mutex;

pub struct InMemoryCatalog {
    raw: RawCatalog,
}

impl InMemoryCatalog {
    pub fn new(raw: RawCatalog) -> Self {
        InMemoryCatalog { raw }
    }
}

impl CatalogPort for InMemoryCatalog {
    fn load(&self) -> Result<RawCatalog> {
        Ok(self.raw.clone())
    }
}

#[derive(Default)]
pub struct InMemorySchedule {
    records: Mutex<Vec<ScheduleRecord>>,
    substitutions: Mutex<Vec<SubstitutionRecord>>,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulePort for InMemorySchedule {
    fn committed_records(&self) -> Result<Vec<ScheduleRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn record_by_id(&self, id: &str) -> Result<Option<ScheduleRecord>> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    fn commit(&self, records: Vec<ScheduleRecord>) -> Result<()> {
        *self.records.lock().unwrap() = records;
        Ok(())
    }

    fn replace_record(&self, record: ScheduleRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(slot) = records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        } else {
            records.push(record);
        }
        Ok(())
    }

    fn append_substitution(&self, substitution: SubstitutionRecord) -> Result<()> {
        self.substitutions.lock().unwrap().push(substitution);
        Ok(())
    }

    fn approve_substitution(&self, substitution_id: &str, approver: &str) -> Result<()> {
        let mut substitutions = self.substitutions.lock().unwrap();
        if let Some(sub) = substitutions.iter_mut().find(|s| s.id == substitution_id) {
            sub.approved = true;
            sub.approved_by = Some(approver.to_string());
        }
        Ok(())
    }

    fn substitutions_for_staff_on(
        &self,
        staff_id: &StaffId,
        date: NaiveDate,
    ) -> Result<Vec<SubstitutionRecord>> {
        Ok(self
            .substitutions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.substitute_staff_id == staff_id && s.date == date)
            .cloned()
            .collect())
    }
}
