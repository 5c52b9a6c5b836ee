// src/db/availability_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        account::AccountSummary,
        availability::{PendingAvailability, ScheduleEntry, WeeklyAvailability},
    },
};

// Linha interna das consultas que trazem o tutor junto
#[derive(Debug, sqlx::FromRow)]
struct AvailabilityWithTutorRow {
    id: Uuid,
    weekly_schedule: Json<Vec<ScheduleEntry>>,
    created_at: chrono::DateTime<chrono::Utc>,
    tutor_id: Uuid,
    tutor_name: String,
    tutor_email: String,
    tutor_id_number: String,
    tutor_grade_level: String,
}

// Agenda aprovada + resumo do tutor, insumo do gerador de slots
#[derive(Debug, Clone)]
pub struct ApprovedAvailability {
    pub tutor: AccountSummary,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tutor_id: Uuid,
        schedule: &[ScheduleEntry],
    ) -> Result<WeeklyAvailability, AppError> {
        let availability = sqlx::query_as::<_, WeeklyAvailability>(
            r#"
            INSERT INTO availabilities (tutor_id, weekly_schedule)
            VALUES ($1, $2)
            RETURNING id, tutor_id, weekly_schedule, is_approved, created_at, updated_at
            "#,
        )
        .bind(tutor_id)
        .bind(Json(schedule))
        .fetch_one(&self.pool)
        .await?;
        Ok(availability)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WeeklyAvailability>, AppError> {
        let maybe = sqlx::query_as::<_, WeeklyAvailability>(
            r#"
            SELECT id, tutor_id, weekly_schedule, is_approved, created_at, updated_at
            FROM availabilities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn find_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<WeeklyAvailability>, AppError> {
        let rows = sqlx::query_as::<_, WeeklyAvailability>(
            r#"
            SELECT id, tutor_id, weekly_schedule, is_approved, created_at, updated_at
            FROM availabilities
            WHERE tutor_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(tutor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Submissões pendentes com os dados do tutor, para a tela do admin
    pub async fn list_pending(&self) -> Result<Vec<PendingAvailability>, AppError> {
        let rows = sqlx::query_as::<_, AvailabilityWithTutorRow>(
            r#"
            SELECT
                a.id, a.weekly_schedule, a.created_at,
                u.id AS tutor_id, u.name AS tutor_name, u.email AS tutor_email,
                u.id_number AS tutor_id_number, u.grade_level AS tutor_grade_level
            FROM availabilities a
            JOIN accounts u ON u.id = a.tutor_id
            WHERE NOT a.is_approved
            ORDER BY a.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PendingAvailability {
                id: row.id,
                tutor: AccountSummary {
                    id: row.tutor_id,
                    name: row.tutor_name,
                    email: row.tutor_email,
                    id_number: row.tutor_id_number,
                },
                grade_level: row.tutor_grade_level,
                weekly_schedule: row.weekly_schedule,
                created_at: row.created_at,
            })
            .collect())
    }

    // Agendas aprovadas (opcionalmente de um único tutor, por e-mail).
    // O filtro por dia da semana acontece em memória, no gerador.
    pub async fn list_approved(
        &self,
        tutor_email: Option<&str>,
    ) -> Result<Vec<ApprovedAvailability>, AppError> {
        let base = r#"
            SELECT
                a.id, a.weekly_schedule, a.created_at,
                u.id AS tutor_id, u.name AS tutor_name, u.email AS tutor_email,
                u.id_number AS tutor_id_number, u.grade_level AS tutor_grade_level
            FROM availabilities a
            JOIN accounts u ON u.id = a.tutor_id
            WHERE a.is_approved
        "#;

        let rows = match tutor_email {
            Some(email) => {
                sqlx::query_as::<_, AvailabilityWithTutorRow>(&format!(
                    "{base} AND u.email = $1"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AvailabilityWithTutorRow>(base)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| ApprovedAvailability {
                tutor: AccountSummary {
                    id: row.tutor_id,
                    name: row.tutor_name,
                    email: row.tutor_email,
                    id_number: row.tutor_id_number,
                },
                schedule: row.weekly_schedule.0,
            })
            .collect())
    }

    // Aprovação em si: roda dentro da transação do serviço.
    pub async fn mark_approved<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE availabilities SET is_approved = TRUE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Remove as submissões-irmãs do mesmo tutor ao aprovar uma delas.
    pub async fn delete_siblings<'e, E>(
        &self,
        executor: E,
        tutor_id: Uuid,
        keep_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM availabilities WHERE tutor_id = $1 AND id <> $2")
            .bind(tutor_id)
            .bind(keep_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tutor_id: Option<(Uuid,)> =
            sqlx::query_as("DELETE FROM availabilities WHERE id = $1 RETURNING tutor_id")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(tutor_id.map(|(id,)| id))
    }

    pub async fn delete_by_tutor<'e, E>(
        &self,
        executor: E,
        tutor_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM availabilities WHERE tutor_id = $1")
            .bind(tutor_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
