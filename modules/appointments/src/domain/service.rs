use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Appointment, AppointmentPatch, NewAppointment};
use crate::domain::ports::ConfirmationNotifier;
use crate::domain::repo::{AppointmentsRepository, CommitOutcome};

/// Domain service orchestrating the proposal/commit workflow.
/// Depends only on the repository and notifier ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn AppointmentsRepository>,
    notifier: Arc<dyn ConfirmationNotifier>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_title_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn AppointmentsRepository>,
        notifier: Arc<dyn ConfirmationNotifier>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    #[instrument(name = "appointments.service.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Appointment>, DomainError> {
        debug!("Listing all appointments");
        self.repo
            .list()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "appointments.service.list_range", skip(self))]
    pub async fn list_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, DomainError> {
        if from >= to {
            return Err(DomainError::validation(
                "endDate",
                "must be after startDate",
            ));
        }
        debug!("Listing appointments in range");
        self.repo
            .list_in_range(from, to)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "appointments.service.get", skip(self), fields(id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Appointment, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Proposal/commit workflow: validate, then atomically check the slot
    /// and persist. A conflicted slot surfaces as `SlotConflict` carrying the
    /// overlapping records; nothing is persisted in that case.
    #[instrument(
        name = "appointments.service.propose",
        skip(self, candidate),
        fields(title = %candidate.title)
    )]
    pub async fn propose(&self, candidate: NewAppointment) -> Result<Appointment, DomainError> {
        info!("Proposing appointment");
        self.validate_candidate(&candidate)?;

        let appt = Appointment::from_candidate(candidate, Utc::now());
        match self
            .repo
            .insert_if_free(appt)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            CommitOutcome::Committed(appt) => {
                info!("Committed appointment with id={}", appt.id);
                self.notify_confirmed(&appt);
                Ok(appt)
            }
            CommitOutcome::Conflicted(conflicts) => {
                info!("Rejected appointment: {} conflict(s)", conflicts.len());
                Err(DomainError::slot_conflict(conflicts))
            }
            CommitOutcome::Missing => Err(DomainError::database("insert reported a missing row")),
        }
    }

    /// Update an existing record; the overlap predicate re-runs with the
    /// record's own id excluded, so an unchanged slot never conflicts with
    /// itself.
    #[instrument(name = "appointments.service.update", skip(self, patch), fields(id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, DomainError> {
        info!("Updating appointment");

        let mut current = self.get(id).await?;
        current.apply_patch(patch, Utc::now());
        self.validate_record(&current)?;

        match self
            .repo
            .update_if_free(current)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            CommitOutcome::Committed(appt) => {
                info!("Successfully updated appointment");
                Ok(appt)
            }
            CommitOutcome::Conflicted(conflicts) => Err(DomainError::slot_conflict(conflicts)),
            CommitOutcome::Missing => Err(DomainError::not_found(id)),
        }
    }

    #[instrument(name = "appointments.service.delete", skip(self), fields(id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting appointment");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted appointment");
        Ok(())
    }

    /// Fire-and-forget confirmation. Only full appointments (with a patient
    /// email) are announced; failures are logged and never change the
    /// already-committed outcome.
    fn notify_confirmed(&self, appt: &Appointment) {
        if appt.patient_email.is_none() {
            return;
        }
        let notifier = Arc::clone(&self.notifier);
        let appt = appt.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.appointment_confirmed(&appt).await {
                warn!(id = %appt.id, error = %e, "Confirmation notification failed");
            }
        });
    }

    // --- validation helpers ---

    fn validate_candidate(&self, candidate: &NewAppointment) -> Result<(), DomainError> {
        self.validate_fields(
            &candidate.title,
            &candidate.platform,
            candidate.start,
            candidate.end,
        )
    }

    fn validate_record(&self, appt: &Appointment) -> Result<(), DomainError> {
        self.validate_fields(&appt.title, &appt.platform, appt.start, appt.end)
    }

    fn validate_fields(
        &self,
        title: &str,
        platform: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        if title.len() > self.config.max_title_length {
            return Err(DomainError::validation(
                "title",
                format!(
                    "too long: {} characters (max: {})",
                    title.len(),
                    self.config.max_title_length
                ),
            ));
        }
        if platform.trim().is_empty() {
            return Err(DomainError::validation("platform", "must not be empty"));
        }
        if start >= end {
            return Err(DomainError::validation("end", "must be after start"));
        }
        Ok(())
    }
}
