// src/models/slot.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::account::AccountSummary;
use crate::models::hhmm;

// Um slot persistido. Só existe no banco depois de uma reserva:
// a chave natural é (tutor_id, date, start_time, end_time).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Option<Uuid>,
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:30")]
    pub end_time: NaiveTime,

    pub subjects: Vec<String>,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

// Slot candidato gerado sob demanda a partir da agenda aprovada.
// Nunca é persistido; o id serve só para referência do cliente.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    pub id: Uuid,
    pub tutor: AccountSummary,
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:30")]
    pub end_time: NaiveTime,

    pub subjects: Vec<String>,
    pub is_booked: bool,
}

// Reserva com as partes embutidas (listagens de agendamentos)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotWithParties {
    pub id: Uuid,
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:30")]
    pub end_time: NaiveTime,

    pub subjects: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor: Option<AccountSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<AccountSummary>,
}

// Corpo de POST /api/slots/book
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotPayload {
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:30")]
    pub end_time: NaiveTime,

    #[serde(default)]
    pub subjects: Vec<String>,
}

// Filtros de GET /api/tutors/slots
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    // Data-alvo em "YYYY-MM-DD"; obrigatória.
    pub date: Option<String>,
    pub tutor_email: Option<String>,
    pub subject: Option<String>,
}
