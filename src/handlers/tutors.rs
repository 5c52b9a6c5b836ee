// src/handlers/tutors.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, SysAdminOnly, TutorOnly, ensure_self_or_sysadmin},
    },
    models::{
        account::{Account, Role, UpdateAccountPayload},
        availability::{CreateAvailabilityPayload, WeeklyAvailability},
        report::TutorReport,
        slot::{CandidateSlot, SlotQuery, SlotWithParties},
    },
};

// GET /api/tutors
#[utoipa::path(
    get,
    path = "/api/tutors",
    tag = "Tutors",
    responses((status = 200, description = "Todos os tutores", body = Vec<Account>)),
    security(("api_jwt" = []))
)]
pub async fn get_all_tutors(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tutors = app_state
        .account_repo
        .list_by_roles(&[Role::Tutor, Role::SysAdmin])
        .await?;
    Ok(Json(tutors))
}

// GET /api/tutors/subjects: matérias distintas das agendas aprovadas
#[utoipa::path(
    get,
    path = "/api/tutors/subjects",
    tag = "Tutors",
    responses((status = 200, description = "Matérias ordenadas", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn get_subjects(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = app_state.availability_service.distinct_subjects().await?;
    Ok(Json(subjects))
}

// GET /api/tutors/slots?date&tutorEmail&subject
// Candidatos efêmeros: nada é persistido por esta rota.
#[utoipa::path(
    get,
    path = "/api/tutors/slots",
    tag = "Tutors",
    params(SlotQuery),
    responses(
        (status = 200, description = "Slots candidatos do dia", body = Vec<CandidateSlot>),
        (status = 400, description = "Parâmetro date ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_slots(
    State(app_state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state
        .slot_service
        .generate_candidates(
            query.date.as_deref(),
            query.tutor_email.as_deref(),
            query.subject.as_deref(),
        )
        .await?;
    Ok(Json(slots))
}

// POST /api/tutors/{tutorId}/availability
#[utoipa::path(
    post,
    path = "/api/tutors/{tutorId}/availability",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    request_body = CreateAvailabilityPayload,
    responses(
        (status = 201, description = "Submissão criada (pendente)", body = WeeklyAvailability),
        (status = 403, description = "Só o próprio tutor ou SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_availability(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _: RequireRole<TutorOnly>,
    Path(tutor_id): Path<Uuid>,
    Json(payload): Json<CreateAvailabilityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_self_or_sysadmin(&caller, tutor_id)?;

    let availability = app_state
        .availability_service
        .create_for_tutor(tutor_id, &payload.weekly_schedule)
        .await?;

    Ok((StatusCode::CREATED, Json(availability)))
}

// GET /api/tutors/{tutorId}/availability
// O parâmetro aceita UUID ou matrícula.
#[utoipa::path(
    get,
    path = "/api/tutors/{tutorId}/availability",
    tag = "Tutors",
    params(("tutorId" = String, Path, description = "ID ou matrícula do tutor")),
    responses(
        (status = 200, description = "Agendas do tutor", body = Vec<WeeklyAvailability>),
        (status = 404, description = "Tutor sem agenda cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    Path(tutor_param): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let availabilities = app_state
        .availability_service
        .get_for_tutor(&tutor_param)
        .await?;
    Ok(Json(availabilities))
}

// DELETE /api/tutors/{tutorId}/availability
// Derruba também todos os slots do tutor, na mesma transação.
#[utoipa::path(
    delete,
    path = "/api/tutors/{tutorId}/availability",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    responses(
        (status = 200, description = "Agenda e slots removidos"),
        (status = 404, description = "Tutor sem agenda cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_availability(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _: RequireRole<TutorOnly>,
    Path(tutor_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_sysadmin(&caller, tutor_id)?;

    let deleted_slots = app_state
        .availability_service
        .delete_for_tutor(tutor_id)
        .await?;

    Ok(Json(json!({
        "message": "Availability and related slots deleted successfully",
        "deletedSlotsCount": deleted_slots,
    })))
}

// GET /api/tutors/{tutorId}/bookings
#[utoipa::path(
    get,
    path = "/api/tutors/{tutorId}/bookings",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    responses((status = 200, description = "Reservas do tutor", body = Vec<SlotWithParties>)),
    security(("api_jwt" = []))
)]
pub async fn get_tutor_bookings(
    State(app_state): State<AppState>,
    Path(tutor_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.slot_service.bookings_for_tutor(tutor_id).await?;
    Ok(Json(bookings))
}

// GET /api/tutors/{tutorId}/report
#[utoipa::path(
    get,
    path = "/api/tutors/{tutorId}/report",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    responses((status = 200, description = "Resumo do tutor", body = TutorReport)),
    security(("api_jwt" = []))
)]
pub async fn get_tutor_report(
    State(app_state): State<AppState>,
    Path(tutor_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.slot_service.tutor_report(tutor_id).await?;
    Ok(Json(report))
}

// GET /api/tutors/{tutorId}
#[utoipa::path(
    get,
    path = "/api/tutors/{tutorId}",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    responses(
        (status = 200, description = "Tutor encontrado", body = Account),
        (status = 404, description = "Conta inexistente ou sem papel de tutor")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tutor_by_id(
    State(app_state): State<AppState>,
    Path(tutor_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = app_state
        .account_repo
        .find_by_id_with_role(tutor_id, Role::Tutor)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(tutor))
}

// PATCH /api/tutors/{tutorId}
#[utoipa::path(
    patch,
    path = "/api/tutors/{tutorId}",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    request_body = UpdateAccountPayload,
    responses(
        (status = 200, description = "Tutor atualizado", body = Account),
        (status = 403, description = "Só o próprio tutor ou SysAdmin"),
        (status = 404, description = "Conta inexistente ou sem papel de tutor")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tutor(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _: RequireRole<TutorOnly>,
    Path(tutor_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_self_or_sysadmin(&caller, tutor_id)?;

    app_state
        .account_repo
        .find_by_id_with_role(tutor_id, Role::Tutor)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let tutor = app_state
        .account_repo
        .update_profile(
            tutor_id,
            payload.name.as_deref(),
            payload.grade_level.as_deref(),
        )
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(json!({ "message": "Tutor updated", "tutor": tutor })))
}

// DELETE /api/tutors/{tutorId}
#[utoipa::path(
    delete,
    path = "/api/tutors/{tutorId}",
    tag = "Tutors",
    params(("tutorId" = Uuid, Path, description = "ID do tutor")),
    responses(
        (status = 200, description = "Tutor removido"),
        (status = 403, description = "Apenas SysAdmin"),
        (status = 404, description = "Conta inexistente ou sem papel de tutor")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tutor(
    State(app_state): State<AppState>,
    _: RequireRole<SysAdminOnly>,
    Path(tutor_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .account_repo
        .delete_with_roles(&app_state.db_pool, tutor_id, &[Role::Tutor])
        .await?;
    if !deleted {
        return Err(AppError::UserNotFound);
    }
    Ok(Json(json!({ "message": "Tutor deleted successfully" })))
}
