// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::report::{OverviewReport, ReportQuery},
};

// Resposta de download: CSV com Content-Disposition de anexo
fn csv_attachment(filename: &str, csv: String) -> impl IntoResponse + use<> {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
}

// GET /api/reports/overview?start&end
#[utoipa::path(
    get,
    path = "/api/reports/overview",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Resumo do centro + estatísticas por tutor", body = OverviewReport),
        (status = 403, description = "Apenas Admin/SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _: RequireRole<AdminOnly>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .report_service
        .overview(&caller, query.start.as_deref(), query.end.as_deref())
        .await?;
    Ok(Json(report))
}

// GET /api/reports/center-csv?start&end
#[utoipa::path(
    get,
    path = "/api/reports/center-csv",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV do centro (anexo)"),
        (status = 403, description = "Apenas Admin/SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_center_csv(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state
        .report_service
        .center_csv(query.start.as_deref(), query.end.as_deref())
        .await?;

    Ok(csv_attachment("bughouse_center_report.csv", csv))
}

// GET /api/reports/tutor-csv/{tutorId}?start&end
#[utoipa::path(
    get,
    path = "/api/reports/tutor-csv/{tutorId}",
    tag = "Reports",
    params(
        ("tutorId" = Uuid, Path, description = "ID do tutor"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "CSV individual do tutor (anexo)"),
        (status = 403, description = "Apenas Admin/SysAdmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_tutor_csv(
    State(app_state): State<AppState>,
    _: RequireRole<AdminOnly>,
    Path(tutor_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state
        .report_service
        .tutor_csv(tutor_id, query.start.as_deref(), query.end.as_deref())
        .await?;

    let filename = format!("tutor_report_{tutor_id}.csv");
    Ok(csv_attachment(&filename, csv))
}
