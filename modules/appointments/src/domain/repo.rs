use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::model::Appointment;

/// Outcome of an atomic check-and-write against the store.
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// The record was persisted; no overlapping record existed at write time.
    Committed(Appointment),
    /// Overlapping records were found and nothing was written, in store
    /// enumeration order.
    Conflicted(Vec<Appointment>),
    /// The target record no longer exists (updates only).
    Missing,
}

/// Port for the domain layer: persistence operations the workflow needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// The overlap check and the write in `insert_if_free`/`update_if_free` must
/// happen atomically (one transaction, or one lock guard for the in-memory
/// store), so two concurrent proposals for overlapping slots cannot both
/// commit.
#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    /// All records in enumeration order (creation time ascending).
    async fn list(&self) -> anyhow::Result<Vec<Appointment>>;
    /// Records whose interval overlaps `[from, to)`, ordered by start.
    async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Load a record by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;
    /// Read-only overlap probe; `exclude` skips one record id.
    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Insert unless an overlapping record exists.
    async fn insert_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome>;
    /// Replace the record carrying `appt.id` unless another record overlaps.
    async fn update_if_free(&self, appt: Appointment) -> anyhow::Result<CommitOutcome>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
