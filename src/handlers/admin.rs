// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::{availability::PendingAvailability, slot::SlotWithParties},
};

// GET /api/admin/availability/pending
#[utoipa::path(
    get,
    path = "/api/admin/availability/pending",
    tag = "Admin",
    responses(
        (status = 200, description = "Submissões pendentes com os dados do tutor", body = Vec<PendingAvailability>),
        (status = 403, description = "Apenas Admin/SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_pending_availabilities(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let pending = app_state.availability_service.list_pending().await?;
    Ok(Json(pending))
}

// POST /api/admin/availability/{availabilityId}/approve
// Aprovar uma submissão apaga as irmãs pendentes do mesmo tutor.
#[utoipa::path(
    post,
    path = "/api/admin/availability/{availabilityId}/approve",
    tag = "Admin",
    params(("availabilityId" = Uuid, Path, description = "ID da submissão")),
    responses(
        (status = 200, description = "Disponibilidade aprovada"),
        (status = 400, description = "Já aprovada"),
        (status = 403, description = "Apenas Admin/SysAdmin"),
        (status = 404, description = "Submissão inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_availability(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
    Path(availability_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .availability_service
        .approve(availability_id)
        .await?;
    Ok(Json(json!({ "message": "Availability approved" })))
}

// DELETE /api/admin/availability/{availabilityId}
#[utoipa::path(
    delete,
    path = "/api/admin/availability/{availabilityId}",
    tag = "Admin",
    params(("availabilityId" = Uuid, Path, description = "ID da submissão")),
    responses(
        (status = 200, description = "Disponibilidade e slots do tutor removidos"),
        (status = 403, description = "Apenas Admin/SysAdmin"),
        (status = 404, description = "Submissão inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_availability(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
    Path(availability_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .availability_service
        .delete_by_id(availability_id)
        .await?;
    Ok(Json(json!({
        "message": "Availability and related slots deleted successfully"
    })))
}

// GET /api/admin/appointments
#[utoipa::path(
    get,
    path = "/api/admin/appointments",
    tag = "Admin",
    responses(
        (status = 200, description = "Todas as reservas com as partes embutidas", body = Vec<SlotWithParties>),
        (status = 403, description = "Apenas Admin/SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_appointments(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.slot_service.all_appointments().await?;
    Ok(Json(appointments))
}
