// src/handlers/slots.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::slot::{BookSlotPayload, Slot},
};

// POST /api/slots/book
// A reserva materializa o slot: é aqui que o documento passa a existir.
#[utoipa::path(
    post,
    path = "/api/slots/book",
    tag = "Slots",
    request_body = BookSlotPayload,
    responses(
        (status = 200, description = "Slot reservado", body = Slot),
        (status = 400, description = "Chave natural já reservada")
    ),
    security(("api_jwt" = []))
)]
pub async fn book_slot(
    State(app_state): State<AppState>,
    Json(payload): Json<BookSlotPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let slot = app_state.slot_service.book(&payload).await?;
    Ok(Json(json!({ "message": "Slot booked!", "slot": slot })))
}

// GET /api/slots/{slotId}
#[utoipa::path(
    get,
    path = "/api/slots/{slotId}",
    tag = "Slots",
    params(("slotId" = Uuid, Path, description = "ID do slot")),
    responses(
        (status = 200, description = "Slot encontrado", body = Slot),
        (status = 404, description = "Slot inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_slot_by_id(
    State(app_state): State<AppState>,
    Path(slot_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let slot = app_state.slot_service.get(slot_id).await?;
    Ok(Json(slot))
}

// DELETE /api/slots/{slotId}
#[utoipa::path(
    delete,
    path = "/api/slots/{slotId}",
    tag = "Slots",
    params(("slotId" = Uuid, Path, description = "ID do slot")),
    responses(
        (status = 200, description = "Reserva cancelada"),
        (status = 404, description = "Slot inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_slot(
    State(app_state): State<AppState>,
    Path(slot_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.slot_service.cancel(slot_id).await?;
    Ok(Json(json!({ "message": "Booking cancelled" })))
}
