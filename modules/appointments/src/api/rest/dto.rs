use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Appointment, AppointmentPatch, NewAppointment};

// Wire format is camelCase throughout, matching the public API contract.

/// REST DTO for a committed appointment record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for the event list envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListDto {
    pub items: Vec<AppointmentDto>,
}

/// Query parameters for the event list; both bounds or neither.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// REST DTO for proposing (or directly creating) an event.
///
/// Required fields stay `Option` here so a missing field maps to a 400
/// validation problem instead of a body-rejection status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposeEventReq {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
}

/// REST DTO for updating an event (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventReq {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub platform: Option<String>,
    pub service_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub therapist_id: Option<String>,
    pub therapist_name: Option<String>,
}

/// One conflicting existing record, as rendered to the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDto {
    pub id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

/// 200 response for a clear proposal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAcceptedDto {
    pub message: String,
    pub event: AppointmentDto,
}

/// 409 response pairing the proposed record with each overlapping record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRejectedDto {
    pub message: String,
    pub proposed_event: ProposeEventReq,
    pub conflicts: Vec<ConflictDto>,
}

/// Plain message envelope (delete confirmation)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

/// Parse a request timestamp; the wire carries RFC 3339 strings.
pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DomainError::validation(field, "must be an RFC 3339 timestamp"))
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::validation(field, "is required"))
}

impl ProposeEventReq {
    /// Presence and timestamp checks; content rules live in the domain service.
    pub fn into_candidate(self) -> Result<NewAppointment, DomainError> {
        let title = require(self.title, "title")?;
        let start = parse_timestamp(&require(self.start, "start")?, "start")?;
        let end = parse_timestamp(&require(self.end, "end")?, "end")?;
        let platform = require(self.platform, "platform")?;
        Ok(NewAppointment {
            title,
            start,
            end,
            platform,
            service_id: self.service_id,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            patient_phone: self.patient_phone,
            therapist_id: self.therapist_id,
            therapist_name: self.therapist_name,
        })
    }
}

impl UpdateEventReq {
    pub fn into_patch(self) -> Result<AppointmentPatch, DomainError> {
        Ok(AppointmentPatch {
            title: self.title,
            start: self
                .start
                .map(|s| parse_timestamp(&s, "start"))
                .transpose()?,
            end: self.end.map(|s| parse_timestamp(&s, "end")).transpose()?,
            platform: self.platform,
            service_id: self.service_id,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            patient_phone: self.patient_phone,
            therapist_id: self.therapist_id,
            therapist_name: self.therapist_name,
        })
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            start: a.start,
            end: a.end,
            platform: a.platform,
            service_id: a.service_id,
            patient_name: a.patient_name,
            patient_email: a.patient_email,
            patient_phone: a.patient_phone,
            therapist_id: a.therapist_id,
            therapist_name: a.therapist_name,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<&Appointment> for ConflictDto {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id,
            title: a.title.clone(),
            start: a.start,
            end: a.end,
            service_id: a.service_id.clone(),
        }
    }
}
