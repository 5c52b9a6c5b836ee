// src/handlers/users.rs

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
        rbac::{AdminOnly, RequireRole, SysAdminOnly, ensure_self_or_admin},
    },
    models::account::{
        Account, AccountQuery, CreateAccountPayload, Role, UpdateAccountPayload,
        UpdateRolePayload,
    },
};

// POST /api/users (público: auto-cadastro no primeiro login)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateAccountPayload,
    responses(
        (status = 201, description = "Conta criada", body = Account),
        (status = 400, description = "Campos ausentes ou e-mail/matrícula já usados")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Campo ausente ou vazio: 400 com a mensagem do contrato
    let required = |field: Option<String>| field.filter(|v| !v.is_empty());
    let (Some(email), Some(name), Some(id_number), Some(grade_level), Some(role)) = (
        required(payload.email),
        required(payload.name),
        required(payload.id_number),
        required(payload.grade_level),
        required(payload.role),
    ) else {
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    let role =
        Role::parse(&role).ok_or_else(|| AppError::BadRequest("Invalid role".into()))?;

    let account = app_state
        .account_repo
        .create(&email, &name, &id_number, &grade_level, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": account })),
    ))
}

// GET /api/users?email=
// Admin/SysAdmin enxergam todo mundo; os demais, só a própria conta.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(AccountQuery),
    responses(
        (status = 200, description = "Lista de contas", body = Vec<Account>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Query(query): Query<AccountQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !caller.role.is_admin() {
        return Ok(Json(vec![caller]));
    }

    let accounts = app_state
        .account_repo
        .list_all(query.email.as_deref())
        .await?;
    Ok(Json(accounts))
}

// GET /api/users/email/{email}
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "E-mail da conta")),
    responses(
        (status = 200, description = "Conta encontrada", body = Account),
        (status = 403, description = "Nem admin nem o próprio dono"),
        (status = 404, description = "Conta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user_by_email(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = app_state
        .account_repo
        .find_by_email(&email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    ensure_self_or_admin(&caller, account.id)?;
    Ok(Json(account))
}

// GET /api/users/{userId}
#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    tag = "Users",
    params(("userId" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta encontrada", body = Account),
        (status = 403, description = "Nem admin nem o próprio dono"),
        (status = 404, description = "Conta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user_by_id(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let account = app_state
        .account_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    ensure_self_or_admin(&caller, account.id)?;
    Ok(Json(account))
}

// PUT /api/users/{userId}
#[utoipa::path(
    put,
    path = "/api/users/{userId}",
    tag = "Users",
    params(("userId" = Uuid, Path, description = "ID da conta")),
    request_body = UpdateAccountPayload,
    responses(
        (status = 200, description = "Conta atualizada", body = Account),
        (status = 403, description = "Nem admin nem o próprio dono"),
        (status = 404, description = "Conta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    ensure_self_or_admin(&caller, user_id)?;

    let account = app_state
        .account_repo
        .update_profile(
            user_id,
            payload.name.as_deref(),
            payload.grade_level.as_deref(),
        )
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(json!({ "message": "User updated", "user": account })))
}

// DELETE /api/users/{userId} (apenas SysAdmin)
#[utoipa::path(
    delete,
    path = "/api/users/{userId}",
    tag = "Users",
    params(("userId" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta removida"),
        (status = 403, description = "Apenas SysAdmin"),
        (status = 404, description = "Conta inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _: RequireRole<SysAdminOnly>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.account_repo.delete(user_id).await? {
        return Err(AppError::UserNotFound);
    }
    Ok(Json(json!({ "message": "User deleted" })))
}

// PATCH /api/users/{idNumber}/role
// SysAdmin nunca é atribuível por aqui.
#[utoipa::path(
    patch,
    path = "/api/users/{idNumber}/role",
    tag = "Users",
    params(("idNumber" = String, Path, description = "Matrícula da conta")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Papel atualizado", body = Account),
        (status = 400, description = "Papel inválido"),
        (status = 403, description = "Apenas Admin/SysAdmin"),
        (status = 404, description = "Matrícula desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
    Path(id_number): Path<String>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    // Valida o papel antes de tocar no banco
    let role = match payload.role.as_str() {
        "Student" => Role::Student,
        "Tutor" => Role::Tutor,
        "Admin" => Role::Admin,
        other => return Err(AppError::InvalidRole(other.to_string())),
    };

    let account = app_state
        .account_repo
        .update_role_by_id_number(&id_number, role)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(account))
}
