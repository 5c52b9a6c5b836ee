// src/models/availability.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::account::AccountSummary;
use crate::models::hhmm;

// Um bloco de horário dentro de um dia da semana
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub start_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "17:00")]
    pub end_time: NaiveTime,

    #[schema(example = json!(["Math", "Physics"]))]
    pub subjects: Vec<String>,
}

// Uma entrada da agenda semanal: dia + blocos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    // Nome completo do dia da semana ("Monday", ...), como o front envia.
    #[schema(example = "Monday")]
    pub day: String,

    pub blocks: Vec<TimeBlock>,
}

// Disponibilidade semanal de um tutor, pendente até aprovação do admin
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    pub id: Uuid,
    pub tutor_id: Uuid,

    #[schema(value_type = Vec<ScheduleEntry>)]
    pub weekly_schedule: Json<Vec<ScheduleEntry>>,

    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Submissão pendente com os dados do tutor embutidos (tela do admin)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingAvailability {
    pub id: Uuid,
    pub tutor: AccountSummary,
    pub grade_level: String,

    #[schema(value_type = Vec<ScheduleEntry>)]
    pub weekly_schedule: Json<Vec<ScheduleEntry>>,

    pub created_at: DateTime<Utc>,
}

// Corpo de POST /api/tutors/{tutorId}/availability
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityPayload {
    #[validate(length(min = 1, message = "Weekly schedule is required."))]
    pub weekly_schedule: Vec<ScheduleEntry>,
}
