// src/db/attendance_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        attendance::{AttendanceRecord, AttendanceStatus, RecentEntry, Visit},
        report::VisitRow,
    },
};

const ATTENDANCE_COLUMNS: &str =
    "id, student_id, email, name, status, created_at, updated_at";
const VISIT_COLUMNS: &str = "id, attendance_id, check_in, check_out";

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Criado no primeiro swipe do aluno. Se outro swipe simultâneo criar
    // primeiro, reaproveita o registro existente.
    pub async fn find_or_create(
        &self,
        student_id: &str,
        email: &str,
        name: &str,
    ) -> Result<AttendanceRecord, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO attendance (student_id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id) DO UPDATE SET updated_at = now()
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(student_id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn open_visit(&self, attendance_id: Uuid) -> Result<Option<Visit>, AppError> {
        let maybe = sqlx::query_as::<_, Visit>(&format!(
            "SELECT {VISIT_COLUMNS} FROM attendance_visits WHERE attendance_id = $1 AND check_out IS NULL"
        ))
        .bind(attendance_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Fecha a visita aberta, se houver, no instante dado. A condição
    // `check_out IS NULL` torna o fechamento atômico: dois swipes
    // simultâneos não fecham a mesma visita duas vezes.
    pub async fn close_open_visit<'e, E>(
        &self,
        executor: E,
        attendance_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Visit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Visit>(&format!(
            r#"
            UPDATE attendance_visits
            SET check_out = $2
            WHERE attendance_id = $1 AND check_out IS NULL
            RETURNING {VISIT_COLUMNS}
            "#
        ))
        .bind(attendance_id)
        .bind(at)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    // Abre uma visita nova. O índice parcial garante no máximo uma visita
    // aberta por aluno; quem perder a corrida recebe None.
    pub async fn insert_open_visit<'e, E>(
        &self,
        executor: E,
        attendance_id: Uuid,
        check_in: DateTime<Utc>,
    ) -> Result<Option<Visit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Visit>(&format!(
            r#"
            INSERT INTO attendance_visits (attendance_id, check_in)
            VALUES ($1, $2)
            ON CONFLICT (attendance_id) WHERE check_out IS NULL DO NOTHING
            RETURNING {VISIT_COLUMNS}
            "#
        ))
        .bind(attendance_id)
        .bind(check_in)
        .fetch_optional(executor)
        .await?;
        Ok(maybe)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        attendance_id: Uuid,
        status: AttendanceStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE attendance SET status = $2, updated_at = now() WHERE id = $1")
            .bind(attendance_id)
            .bind(status.as_str())
            .execute(executor)
            .await?;
        Ok(())
    }

    // Fecha de uma vez todas as visitas abertas há mais de `max` horas,
    // travando o check-out em exatamente check_in + max.
    pub async fn sweep_expired(
        &self,
        now: DateTime<Utc>,
        max_minutes: i64,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            WITH expired AS (
                UPDATE attendance_visits
                SET check_out = check_in + make_interval(mins => $2)
                WHERE check_out IS NULL
                  AND check_in < $1 - make_interval(mins => $2)
                RETURNING attendance_id
            )
            UPDATE attendance
            SET status = 'Signed-OUT', updated_at = now()
            WHERE id IN (SELECT attendance_id FROM expired)
            "#,
        )
        .bind(now)
        .bind(max_minutes as i32)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    // Visitas abertas, mais recentes primeiro, para o painel do quiosque
    pub async fn recent_open(&self, limit: i64) -> Result<Vec<RecentEntry>, AppError> {
        let entries = sqlx::query_as::<_, RecentEntry>(
            r#"
            SELECT a.student_id AS id, a.name, v.check_in AS timestamp
            FROM attendance_visits v
            JOIN attendance a ON a.id = v.attendance_id
            WHERE v.check_out IS NULL
            ORDER BY v.check_in DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Insumos do relatório geral
    pub async fn count_records(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn all_visits(&self) -> Result<Vec<VisitRow>, AppError> {
        let visits = sqlx::query_as::<_, VisitRow>(
            "SELECT check_in, check_out FROM attendance_visits ORDER BY check_in",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(visits)
    }
}
