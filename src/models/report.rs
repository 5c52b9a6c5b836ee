// src/models/report.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::account::Role;

// Linha-fonte das agregações: um slot reservado com as partes embutidas.
// Carregada uma vez do banco; todo o resto é computação pura em memória.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    pub tutor_id: Option<Uuid>,
    pub tutor_name: Option<String>,
    pub tutor_email: Option<String>,
    pub student_id: Option<Uuid>,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subjects: Vec<String>,
}

// Visita carregada para o resumo de presença do centro
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VisitRow {
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReportQuery {
    // "YYYY-MM-DD"; ausente = sem limite
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// Cards do topo da tela de relatórios
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total_students: i64,
    pub total_visits: i64,
    pub total_minutes: i64,
    pub avg_visit_minutes: f64,
    pub date_range: DateRange,
    pub total_unique_tutors: usize,
    pub total_unique_students: usize,
    pub busiest_day: Option<String>,
    pub busiest_hour: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TutorStats {
    pub tutor_id: Uuid,
    pub tutor_name: String,
    pub tutor_email: String,
    pub total_sessions: i64,
    pub total_students: usize,
    pub total_minutes: i64,
    pub avg_session_minutes: f64,
}

// Prévia das sessões mais recentes, embutida no overview
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    pub row_number: usize,
    pub tutor_name: String,
    pub tutor_email: String,
    pub student_name: String,
    pub student_email: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub duration_min: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportUser {
    pub email: String,
    pub role: Role,
}

// GET /api/reports/overview
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub message: String,
    pub generated_at: DateTime<Utc>,
    pub user: ReportUser,
    pub summary: OverviewSummary,
    pub tutor_stats: Vec<TutorStats>,
    pub center_preview: Vec<PreviewRow>,
}

// GET /api/tutors/{tutorId}/report
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TutorReport {
    pub total_sessions: i64,
    pub total_students: usize,
    pub subjects: Vec<String>,
    pub average_rating: f64,
}
