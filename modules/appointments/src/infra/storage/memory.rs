//! In-memory repository used by tests and `--mock` runs.
//!
//! A single mutex guards the whole collection, so the check-and-write
//! operations are atomic by construction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::conflict::find_conflicts;
use crate::domain::model::Appointment;
use crate::domain::repo::{AppointmentsRepository, CommitOutcome};

#[derive(Debug, Default)]
pub struct InMemoryAppointmentsRepository {
    records: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, preserving the given enumeration order.
    pub fn with_records(records: Vec<Appointment>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn conflicts_locked(
        records: &[Appointment],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Vec<Appointment> {
        find_conflicts(start, end, exclude, records)
            .into_iter()
            .map(|c| c.existing)
            .collect()
    }
}

#[async_trait]
impl AppointmentsRepository for InMemoryAppointmentsRepository {
    async fn list(&self) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.records.lock().clone())
    }

    async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Appointment>> {
        let mut rows = Self::conflicts_locked(&self.records.lock(), from, to, None);
        rows.sort_by_key(|a| a.start);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        Ok(self.records.lock().iter().find(|a| a.id == id).cloned())
    }

    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Appointment>> {
        Ok(Self::conflicts_locked(
            &self.records.lock(),
            start,
            end,
            exclude,
        ))
    }

    async fn insert_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome> {
        let mut records = self.records.lock();
        let conflicts = Self::conflicts_locked(&records, appt.start, appt.end, None);
        if !conflicts.is_empty() {
            return Ok(CommitOutcome::Conflicted(conflicts));
        }
        records.push(appt.clone());
        Ok(CommitOutcome::Committed(appt))
    }

    async fn update_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome> {
        let mut records = self.records.lock();
        let Some(idx) = records.iter().position(|a| a.id == appt.id) else {
            return Ok(CommitOutcome::Missing);
        };
        let conflicts = Self::conflicts_locked(&records, appt.start, appt.end, Some(appt.id));
        if !conflicts.is_empty() {
            return Ok(CommitOutcome::Conflicted(conflicts));
        }
        records[idx] = appt.clone();
        Ok(CommitOutcome::Committed(appt))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|a| a.id != id);
        Ok(records.len() < before)
    }
}
