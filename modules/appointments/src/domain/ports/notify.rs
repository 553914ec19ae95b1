use async_trait::async_trait;

use crate::domain::model::Appointment;

/// Transport-agnostic confirmation-notification port.
///
/// Invoked after a successful commit of a full appointment (one carrying a
/// patient email). The commit outcome is already decided when this runs; a
/// failure here is logged and never rolls anything back.
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn appointment_confirmed(&self, appt: &Appointment) -> anyhow::Result<()>;
}

/// Notifier that drops every confirmation. Used by tests and `--mock` runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl ConfirmationNotifier for NoopNotifier {
    async fn appointment_confirmed(&self, _appt: &Appointment) -> anyhow::Result<()> {
        Ok(())
    }
}
