use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::domain::model::Appointment;

// Interval bounds are stored as start_at/end_at; "start"/"end" collide with
// SQL keywords on some backends.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Appointment {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            start: m.start_at,
            end: m.end_at,
            platform: m.platform,
            service_id: m.service_id,
            patient_name: m.patient_name,
            patient_email: m.patient_email,
            patient_phone: m.patient_phone,
            therapist_id: m.therapist_id,
            therapist_name: m.therapist_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<Appointment> for Model {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            start_at: a.start,
            end_at: a.end,
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
