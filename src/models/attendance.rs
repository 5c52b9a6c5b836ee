// src/models/attendance.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Estado corrente do aluno, derivado da última visita
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    #[serde(rename = "Signed-IN")]
    SignedIn,

    #[serde(rename = "Signed-OUT")]
    SignedOut,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::SignedIn => "Signed-IN",
            AttendanceStatus::SignedOut => "Signed-OUT",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("status de presença desconhecido: {0}")]
pub struct ParseStatusError(String);

impl TryFrom<String> for AttendanceStatus {
    type Error = ParseStatusError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "Signed-IN" => Ok(AttendanceStatus::SignedIn),
            "Signed-OUT" => Ok(AttendanceStatus::SignedOut),
            _ => Err(ParseStatusError(raw)),
        }
    }
}

// Um registro de presença por aluno
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: String,
    pub email: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Um intervalo de check-in/check-out
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: Uuid,
    pub attendance_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

// Corpo de POST /api/attendance/checkin: a leitura crua do quiosque.
// Campo ausente vira 400 "Swipe data required", não erro de parse.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SwipePayload {
    #[schema(example = ";1002151686?")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwipeCheckIn {
    // Matrícula institucional, como o quiosque exibe
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

// Resposta do swipe. "User not registered" também usa esta forma,
// só com os campos opcionais ausentes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwipeResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<SwipeCheckIn>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

// Linha de GET /api/attendance/recent (visitas abertas, mais novas primeiro)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}
