// src/db/slot_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        account::AccountSummary,
        report::SessionRow,
        slot::{Slot, SlotWithParties},
    },
};

const SLOT_COLUMNS: &str =
    "id, tutor_id, student_id, date, start_time, end_time, subjects, is_booked, created_at";

// Chave natural já reservada em uma data; usada para suprimir candidatos
#[derive(Debug, sqlx::FromRow, PartialEq, Eq, Hash)]
pub struct BookedKey {
    pub tutor_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, sqlx::FromRow)]
struct SlotPartiesRow {
    id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    subjects: Vec<String>,
    tutor_id: Option<Uuid>,
    tutor_name: Option<String>,
    tutor_email: Option<String>,
    tutor_id_number: Option<String>,
    student_id: Option<Uuid>,
    student_name: Option<String>,
    student_email: Option<String>,
    student_id_number: Option<String>,
}

impl SlotPartiesRow {
    fn into_parties(self) -> SlotWithParties {
        let tutor = match (self.tutor_id, self.tutor_name, self.tutor_email, self.tutor_id_number) {
            (Some(id), Some(name), Some(email), Some(id_number)) => Some(AccountSummary {
                id,
                name,
                email,
                id_number,
            }),
            _ => None,
        };
        let student = match (
            self.student_id,
            self.student_name,
            self.student_email,
            self.student_id_number,
        ) {
            (Some(id), Some(name), Some(email), Some(id_number)) => Some(AccountSummary {
                id,
                name,
                email,
                id_number,
            }),
            _ => None,
        };
        SlotWithParties {
            id: self.id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            subjects: self.subjects,
            tutor,
            student,
        }
    }
}

#[derive(Clone)]
pub struct SlotRepository {
    pool: PgPool,
}

impl SlotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Slot>, AppError> {
        let maybe = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM slots WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Pré-checagem rápida da reserva. O índice parcial continua sendo
    // a fonte da verdade em caso de corrida.
    pub async fn find_booked_by_natural_key(
        &self,
        tutor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Slot>, AppError> {
        let maybe = sqlx::query_as::<_, Slot>(&format!(
            r#"
            SELECT {SLOT_COLUMNS} FROM slots
            WHERE tutor_id = $1 AND date = $2 AND start_time = $3 AND end_time = $4
              AND is_booked
            "#
        ))
        .bind(tutor_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Todas as chaves naturais já reservadas na data, para o gerador
    pub async fn booked_keys_on(&self, date: NaiveDate) -> Result<Vec<BookedKey>, AppError> {
        let keys = sqlx::query_as::<_, BookedKey>(
            "SELECT tutor_id, start_time, end_time FROM slots WHERE date = $1 AND is_booked",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(keys)
    }

    // Insere a reserva. Violação do índice da chave natural significa que
    // outra reserva venceu a corrida: vira "Slot already booked".
    pub async fn insert_booked(
        &self,
        student_id: Uuid,
        tutor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subjects: &[String],
    ) -> Result<Slot, AppError> {
        let slot = sqlx::query_as::<_, Slot>(&format!(
            r#"
            INSERT INTO slots (student_id, tutor_id, date, start_time, end_time, subjects, is_booked)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING {SLOT_COLUMNS}
            "#
        ))
        .bind(student_id)
        .bind(tutor_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .bind(subjects.to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("slots_natural_key")
                {
                    return AppError::SlotAlreadyBooked;
                }
            }
            e.into()
        })?;

        Ok(slot)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Limpeza em cascata quando a disponibilidade do tutor é removida
    pub async fn delete_by_tutor<'e, E>(&self, executor: E, tutor_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM slots WHERE tutor_id = $1")
            .bind(tutor_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_booked_with_parties(
        &self,
        tutor_id: Option<Uuid>,
        student_id: Option<Uuid>,
    ) -> Result<Vec<SlotWithParties>, AppError> {
        let mut sql = String::from(
            r#"
            SELECT
                s.id, s.date, s.start_time, s.end_time, s.subjects,
                t.id AS tutor_id, t.name AS tutor_name,
                t.email AS tutor_email, t.id_number AS tutor_id_number,
                st.id AS student_id, st.name AS student_name,
                st.email AS student_email, st.id_number AS student_id_number
            FROM slots s
            LEFT JOIN accounts t ON t.id = s.tutor_id
            LEFT JOIN accounts st ON st.id = s.student_id
            WHERE s.is_booked
            "#,
        );
        if tutor_id.is_some() {
            sql.push_str(" AND s.tutor_id = $1");
        } else if student_id.is_some() {
            sql.push_str(" AND s.student_id = $1");
        }
        sql.push_str(" ORDER BY s.date, s.start_time");

        let query = sqlx::query_as::<_, SlotPartiesRow>(&sql);
        let rows = match tutor_id.or(student_id) {
            Some(id) => query.bind(id).fetch_all(&self.pool).await?,
            None => query.fetch_all(&self.pool).await?,
        };

        Ok(rows.into_iter().map(SlotPartiesRow::into_parties).collect())
    }

    // Linhas-fonte dos relatórios (todas ou de um único tutor)
    pub async fn session_rows(&self, tutor_id: Option<Uuid>) -> Result<Vec<SessionRow>, AppError> {
        let mut sql = String::from(
            r#"
            SELECT
                t.id AS tutor_id, t.name AS tutor_name, t.email AS tutor_email,
                st.id AS student_id, st.name AS student_name, st.email AS student_email,
                s.date, s.start_time, s.end_time, s.subjects
            FROM slots s
            LEFT JOIN accounts t ON t.id = s.tutor_id
            LEFT JOIN accounts st ON st.id = s.student_id
            WHERE s.is_booked
            "#,
        );
        if tutor_id.is_some() {
            sql.push_str(" AND s.tutor_id = $1");
        }
        sql.push_str(" ORDER BY s.date, s.start_time");

        let query = sqlx::query_as::<_, SessionRow>(&sql);
        let rows = match tutor_id {
            Some(id) => query.bind(id).fetch_all(&self.pool).await?,
            None => query.fetch_all(&self.pool).await?,
        };
        Ok(rows)
    }
}
