//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas do quiosque de presença (públicas: o leitor de cartões não
    // tem token; usuário desconhecido recebe 200 informativo)
    let attendance_routes = Router::new()
        .route("/checkin", post(handlers::attendance::check_in))
        .route("/recent", get(handlers::attendance::recent));

    // POST /api/users é público (auto-cadastro no primeiro login)
    let users_public = Router::new().route("/", post(handlers::users::create_user));

    let users_routes = Router::new()
        .route("/", get(handlers::users::get_all_users))
        .route("/email/{email}", get(handlers::users::get_user_by_email))
        .route(
            "/{user_id}",
            get(handlers::users::get_user_by_id)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/{user_id}/role", patch(handlers::users::update_role))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tutor_routes = Router::new()
        .route("/", get(handlers::tutors::get_all_tutors))
        .route("/subjects", get(handlers::tutors::get_subjects))
        .route("/slots", get(handlers::tutors::get_slots))
        .route(
            "/{tutor_id}/availability",
            post(handlers::tutors::create_availability)
                .get(handlers::tutors::get_availability)
                .delete(handlers::tutors::delete_availability),
        )
        .route(
            "/{tutor_id}/bookings",
            get(handlers::tutors::get_tutor_bookings),
        )
        .route("/{tutor_id}/report", get(handlers::tutors::get_tutor_report))
        .route(
            "/{tutor_id}",
            get(handlers::tutors::get_tutor_by_id)
                .patch(handlers::tutors::update_tutor)
                .delete(handlers::tutors::delete_tutor),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let student_routes = Router::new()
        .route("/", get(handlers::students::get_all_students))
        .route(
            "/{student_id}/bookings",
            get(handlers::students::get_student_bookings),
        )
        .route(
            "/{student_id}",
            get(handlers::students::get_student_by_id)
                .patch(handlers::students::update_student)
                .delete(handlers::students::delete_student),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let slot_routes = Router::new()
        .route("/book", post(handlers::slots::book_slot))
        .route(
            "/{slot_id}",
            get(handlers::slots::get_slot_by_id).delete(handlers::slots::delete_slot),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route(
            "/availability/pending",
            get(handlers::admin::get_pending_availabilities),
        )
        .route(
            "/availability/{availability_id}/approve",
            post(handlers::admin::approve_availability),
        )
        .route(
            "/availability/{availability_id}",
            delete(handlers::admin::delete_availability),
        )
        .route("/appointments", get(handlers::admin::get_all_appointments))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/overview", get(handlers::reports::get_overview))
        .route("/center-csv", get(handlers::reports::download_center_csv))
        .route(
            "/tutor-csv/{tutor_id}",
            get(handlers::reports::download_tutor_csv),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/users", users_public.merge(users_routes))
        .nest("/api/tutors", tutor_routes)
        .nest("/api/students", student_routes)
        .nest("/api/slots", slot_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/attendance", attendance_routes)
        .nest("/api/reports", report_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
