// src/handlers/students.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{RequireRole, SysAdminOnly, ensure_self_or_admin, ensure_self_or_sysadmin},
    },
    models::account::{Role, UpdateAccountPayload},
};

// GET /api/students
// Admin/SysAdmin enxergam alunos e tutores; os demais, só a si mesmos.
pub async fn get_all_students(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    if !caller.role.is_admin() {
        return Ok(Json(vec![caller]));
    }

    let students = app_state
        .account_repo
        .list_by_roles(&[Role::Student, Role::Tutor])
        .await?;
    Ok(Json(students))
}

// GET /api/students/{studentId}
pub async fn get_student_by_id(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(student_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_admin(&caller, student_id)?;

    let student = app_state
        .account_repo
        .find_by_id(student_id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(student))
}

// GET /api/students/{studentId}/bookings
pub async fn get_student_bookings(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(student_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_admin(&caller, student_id)?;

    let bookings = app_state
        .slot_service
        .bookings_for_student(student_id)
        .await?;
    Ok(Json(bookings))
}

// PATCH /api/students/{studentId}
pub async fn update_student(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(student_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_self_or_sysadmin(&caller, student_id)?;

    let student = app_state
        .account_repo
        .update_profile(
            student_id,
            payload.name.as_deref(),
            payload.grade_level.as_deref(),
        )
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(json!({ "message": "Student updated", "student": student })))
}

// DELETE /api/students/{studentId}
pub async fn delete_student(
    State(app_state): State<AppState>,
    _: RequireRole<SysAdminOnly>,
    Path(student_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .account_repo
        .delete_with_roles(&app_state.db_pool, student_id, &[Role::Student, Role::Tutor])
        .await?;
    if !deleted {
        return Err(AppError::UserNotFound);
    }
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}
