// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel de uma conta. SysAdmin existe apenas por atribuição direta no banco;
// a rota de troca de papel nunca o concede.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Student,
    Tutor,
    Admin,
    SysAdmin,
}

impl Role {
    // Admin e SysAdmin compartilham quase todos os poderes administrativos.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SysAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Tutor => "Tutor",
            Role::Admin => "Admin",
            Role::SysAdmin => "SysAdmin",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "Student" => Some(Role::Student),
            "Tutor" => Some(Role::Tutor),
            "Admin" => Some(Role::Admin),
            "SysAdmin" => Some(Role::SysAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("papel desconhecido: {0}")]
pub struct ParseRoleError(String);

// A coluna `role` é TEXT com CHECK; o decode passa por aqui.
impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Role::parse(&raw).ok_or(ParseRoleError(raw))
    }
}

// Representa uma conta vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub id_number: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub grade_level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resumo embutido nas respostas de slots e relatórios
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub id_number: String,
}

// Dados para criação de conta (auto-cadastro ou admin). Os campos são
// todos opcionais no parse: ausência vira 400 com a mensagem do contrato,
// nunca erro de desserialização.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[schema(example = "maria@mavs.uta.edu")]
    pub email: Option<String>,

    #[schema(example = "Maria Silva")]
    pub name: Option<String>,

    #[schema(example = "1002151686")]
    pub id_number: Option<String>,

    #[schema(example = "Sophomore")]
    pub grade_level: Option<String>,

    #[schema(example = "Student")]
    pub role: Option<String>,
}

// Atualização parcial de perfil (nunca muda papel)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountPayload {
    #[validate(length(min = 1, message = "Name cannot be empty."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Grade level cannot be empty."))]
    pub grade_level: Option<String>,
}

// Troca de papel via PATCH /api/users/{idNumber}/role.
// Chega como texto livre: papel desconhecido vira 400, não 422.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRolePayload {
    #[schema(example = "Tutor")]
    pub role: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AccountQuery {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [Role::Student, Role::Tutor, Role::Admin, Role::SysAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            assert_eq!(Role::try_from(role.as_str().to_string()).unwrap(), role);
        }
        assert_eq!(Role::parse("Professor"), None);
        assert!(Role::try_from("professor".to_string()).is_err());
    }

    #[test]
    fn admin_powers() {
        assert!(Role::Admin.is_admin());
        assert!(Role::SysAdmin.is_admin());
        assert!(!Role::Tutor.is_admin());
        assert!(!Role::Student.is_admin());
    }
}
