use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tracing::debug;

use crate::domain::model::Appointment;
use crate::domain::ports::ConfirmationNotifier;

/// Posts confirmation payloads to the external contact service.
///
/// The service is opaque: one POST per committed appointment, no retries.
pub struct HttpConfirmationNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConfirmationNotifier {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build notification HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ConfirmationNotifier for HttpConfirmationNotifier {
    async fn appointment_confirmed(&self, appt: &Appointment) -> anyhow::Result<()> {
        let url = format!("{}/confirmations", self.base_url.trim_end_matches('/'));
        debug!(id = %appt.id, %url, "Sending confirmation notification");

        let payload = serde_json::json!({
            "appointmentId": appt.id,
            "title": appt.title,
            "start": appt.start,
            "end": appt.end,
            "platform": appt.platform,
            "serviceId": appt.service_id,
            "patientName": appt.patient_name,
            "patientEmail": appt.patient_email,
            "patientPhone": appt.patient_phone,
            "therapistId": appt.therapist_id,
            "therapistName": appt.therapist_name,
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("confirmation request failed")?;
        if !resp.status().is_success() {
            bail!("confirmation service returned {}", resp.status());
        }
        Ok(())
    }
}
