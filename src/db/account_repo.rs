// src/db/account_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::account::{Account, Role},
};

// O repositório de contas, responsável por todas as interações com a tabela 'accounts'
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

const ACCOUNT_COLUMNS: &str =
    "id, email, id_number, name, role, grade_level, created_at, updated_at";

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    pub async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id_number = $1"
        ))
        .bind(id_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    // Busca restrita a um papel específico (ex.: GET /api/tutors/{tutorId})
    pub async fn find_by_id_with_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1 AND role = $2"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    pub async fn list_all(&self, email: Option<&str>) -> Result<Vec<Account>, AppError> {
        let accounts = match email {
            Some(email) => {
                sqlx::query_as::<_, Account>(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1 ORDER BY created_at"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Account>(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(accounts)
    }

    pub async fn list_by_roles(&self, roles: &[Role]) -> Result<Vec<Account>, AppError> {
        let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE role = ANY($1) ORDER BY name"
        ))
        .bind(role_names)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    // Cria uma nova conta, com tratamento específico para duplicidade
    // de e-mail ou matrícula (as constraints são a fonte da verdade).
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        id_number: &str,
        grade_level: &str,
        role: Role,
    ) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (email, name, id_number, grade_level, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(name)
        .bind(id_number)
        .bind(grade_level)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    if let Some(constraint) = db_err.constraint() {
                        if constraint == "accounts_email_key"
                            || constraint == "accounts_id_number_key"
                        {
                            return AppError::EmailOrIdNumberTaken;
                        }
                    }
                }
            }
            e.into()
        })?;

        Ok(account)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        grade_level: Option<&str>,
    ) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET name        = COALESCE($2, name),
                grade_level = COALESCE($3, grade_level),
                updated_at  = now()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(grade_level)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    // A troca de papel é indexada pela matrícula, não pelo id interno.
    pub async fn update_role_by_id_number(
        &self,
        id_number: &str,
        role: Role,
    ) -> Result<Option<Account>, AppError> {
        let maybe_account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET role = $2, updated_at = now()
            WHERE id_number = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(id_number)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_account)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Variante com papel restrito, para as rotas /api/tutors e /api/students
    pub async fn delete_with_roles<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        roles: &[Role],
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1 AND role = ANY($2)")
            .bind(id)
            .bind(role_names)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
