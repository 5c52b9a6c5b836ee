// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::account::Account,
};

// O middleware em si: Bearer token -> e-mail verificado -> conta nas
// extensions da requisição. Tudo que falhar aqui vira 401.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::MissingToken)?;

    let account = app_state.auth_service.authenticate(bearer.token()).await?;

    // Insere a conta nos "extensions" da requisição
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

// Extrator para obter a conta autenticada diretamente nos handlers
pub struct AuthenticatedUser(pub Account);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Account>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::MissingToken)
    }
}
