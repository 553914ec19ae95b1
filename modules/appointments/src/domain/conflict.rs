//! Interval conflict checker.
//!
//! Appointments occupy half-open intervals `[start, end)`, so an appointment
//! ending exactly when another starts is not a conflict and back-to-back
//! booking is allowed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::model::Appointment;

/// Half-open interval overlap test. Touching endpoints do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Pairing of a proposed slot with one existing record it overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictDescriptor {
    pub proposed_start: DateTime<Utc>,
    pub proposed_end: DateTime<Utc>,
    pub existing: Appointment,
}

/// Classify `existing` records against a proposed slot.
///
/// `exclude` skips one record id so an update is never checked against
/// itself. Enumeration order of the input is preserved; an empty result is
/// the success case. Read-only.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
    existing: &[Appointment],
) -> Vec<ConflictDescriptor> {
    existing
        .iter()
        .filter(|a| exclude != Some(a.id))
        .filter(|a| overlaps(start, end, a.start, a.end))
        .map(|a| ConflictDescriptor {
            proposed_start: start,
            proposed_end: end,
            existing: a.clone(),
        })
        .collect()
}
