use thiserror::Error;
use uuid::Uuid;

use crate::domain::model::Appointment;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Appointment not found: {id}")]
    NotFound { id: Uuid },

    #[error("Requested slot overlaps {} existing appointment(s)", conflicts.len())]
    SlotConflict { conflicts: Vec<Appointment> },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn slot_conflict(conflicts: Vec<Appointment>) -> Self {
        Self::SlotConflict { conflicts }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
