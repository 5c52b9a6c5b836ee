// src/handlers/attendance.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::attendance::{RecentEntry, SwipePayload, SwipeResponse},
};

// POST /api/attendance/checkin (rota do quiosque, sem autenticação)
// Um único swipe alterna entrada/saída; usuário desconhecido recebe 200
// informativo para o leitor não exibir tela de erro.
#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    tag = "Attendance",
    request_body = SwipePayload,
    responses(
        (status = 200, description = "Transição registrada (ou usuário não cadastrado)", body = SwipeResponse),
        (status = 400, description = "Leitura vazia ou ininteligível")
    )
)]
pub async fn check_in(
    State(app_state): State<AppState>,
    Json(payload): Json<SwipePayload>,
) -> Result<impl IntoResponse, AppError> {
    let raw = payload.id.unwrap_or_default();
    let response = app_state.attendance_service.swipe(&raw).await?;
    Ok(Json(response))
}

// GET /api/attendance/recent
// Visitas abertas agora, mais recentes primeiro (o quiosque consulta em
// intervalos curtos). Visitas estouradas são fechadas no teto antes.
#[utoipa::path(
    get,
    path = "/api/attendance/recent",
    tag = "Attendance",
    responses(
        (status = 200, description = "Até 50 visitas abertas", body = Vec<RecentEntry>)
    )
)]
pub async fn recent(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.attendance_service.recent().await?;
    Ok(Json(entries))
}
