// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{AccountRepository, AttendanceRepository, AvailabilityRepository, SlotRepository},
    services::{
        AttendanceService, AuthService, AvailabilityService, ReportService, SlotService,
        auth::JwtVerifier,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub account_repo: AccountRepository,
    pub auth_service: AuthService,
    pub availability_service: AvailabilityService,
    pub slot_service: SlotService,
    pub attendance_service: AttendanceService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let account_repo = AccountRepository::new(db_pool.clone());
        let availability_repo = AvailabilityRepository::new(db_pool.clone());
        let slot_repo = SlotRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            account_repo.clone(),
            Arc::new(JwtVerifier::new(jwt_secret)),
        );
        let availability_service = AvailabilityService::new(
            availability_repo.clone(),
            slot_repo.clone(),
            account_repo.clone(),
            db_pool.clone(),
        );
        let slot_service = SlotService::new(slot_repo.clone(), availability_repo);
        let attendance_service = AttendanceService::new(
            attendance_repo.clone(),
            account_repo.clone(),
            db_pool.clone(),
        );
        let report_service = ReportService::new(slot_repo, attendance_repo, account_repo.clone());

        Ok(Self {
            db_pool,
            account_repo,
            auth_service,
            availability_service,
            slot_service,
            attendance_service,
            report_service,
        })
    }
}
