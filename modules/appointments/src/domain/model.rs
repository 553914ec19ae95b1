use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed appointment record.
///
/// `id` is assigned by the proposal workflow at commit time and is immutable
/// thereafter. `start`/`end` are absolute UTC instants forming the half-open
/// interval `[start, end)`. Patient and therapist fields only feed the
/// confirmation-notification collaborator, never the conflict logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub platform: String,
    pub service_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub therapist_id: Option<String>,
    pub therapist_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate appointment handed to the proposal workflow.
///
/// Id and bookkeeping timestamps are assigned by the service at commit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub platform: String,
    pub service_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub therapist_id: Option<String>,
    pub therapist_name: Option<String>,
}

/// Partial update over a stored appointment. `Some` replaces the field,
/// `None` leaves it untouched. Last write wins, no concurrency token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub platform: Option<String>,
    pub service_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub therapist_id: Option<String>,
    pub therapist_name: Option<String>,
}

impl Appointment {
    /// Materialize a candidate into a record with a fresh id and timestamps.
    pub fn from_candidate(candidate: NewAppointment, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: candidate.title,
            start: candidate.start,
            end: candidate.end,
            platform: candidate.platform,
            service_id: candidate.service_id,
            patient_name: candidate.patient_name,
            patient_email: candidate.patient_email,
            patient_phone: candidate.patient_phone,
            therapist_id: candidate.therapist_id,
            therapist_name: candidate.therapist_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place; the caller re-validates afterwards.
    pub fn apply_patch(&mut self, patch: AppointmentPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(service_id) = patch.service_id {
            self.service_id = Some(service_id);
        }
        if let Some(patient_name) = patch.patient_name {
            self.patient_name = Some(patient_name);
        }
        if let Some(patient_email) = patch.patient_email {
            self.patient_email = Some(patient_email);
        }
        if let Some(patient_phone) = patch.patient_phone {
            self.patient_phone = Some(patient_phone);
        }
        if let Some(therapist_id) = patch.therapist_id {
            self.therapist_id = Some(therapist_id);
        }
        if let Some(therapist_name) = patch.therapist_name {
            self.therapist_name = Some(therapist_name);
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candidate() -> NewAppointment {
        NewAppointment {
            title: "Initial consultation".to_string(),
            start: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 1, 1, 11, 0, 0).unwrap(),
            platform: "Zoom".to_string(),
            service_id: Some("svc-1".to_string()),
            patient_name: None,
            patient_email: None,
            patient_phone: None,
            therapist_id: None,
            therapist_name: None,
        }
    }

    #[test]
    fn from_candidate_assigns_id_and_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let appt = Appointment::from_candidate(candidate(), now);
        assert!(!appt.id.is_nil());
        assert_eq!(appt.created_at, now);
        assert_eq!(appt.updated_at, now);
        assert_eq!(appt.title, "Initial consultation");
    }

    #[test]
    fn apply_patch_replaces_only_given_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let mut appt = Appointment::from_candidate(candidate(), now);

        appt.apply_patch(
            AppointmentPatch {
                title: Some("Follow-up".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(appt.title, "Follow-up");
        assert_eq!(appt.platform, "Zoom");
        assert_eq!(appt.service_id.as_deref(), Some("svc-1"));
        assert_eq!(appt.created_at, now);
        assert_eq!(appt.updated_at, later);
    }
}
