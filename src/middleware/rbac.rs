// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::account::{Account, Role},
};

// 1. O trait que define um conjunto de papéis exigido por rota
pub trait RoleSetDef: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

// 2. O extractor (guardião): declarar `RequireRole<AdminOnly>` na
// assinatura do handler é o que impõe a política daquela rota.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSetDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai a conta (colocada pelo auth_guard)
        let account = parts
            .extensions
            .get::<Account>()
            .ok_or(AppError::MissingToken)?;

        // B. Verifica o papel
        if !T::allowed().contains(&account.role) {
            return Err(AppError::AccessDenied);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CONJUNTOS DE PAPÉIS
// ---

pub struct AdminOnly;
impl RoleSetDef for AdminOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Admin, Role::SysAdmin]
    }
}

pub struct TutorOnly;
impl RoleSetDef for TutorOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Tutor, Role::SysAdmin]
    }
}

pub struct SysAdminOnly;
impl RoleSetDef for SysAdminOnly {
    fn allowed() -> &'static [Role] {
        &[Role::SysAdmin]
    }
}

// ---
// PREDICADOS DE PROPRIEDADE
// Checagens "o próprio dono ou admin", compartilhadas pelos handlers.
// ---

pub fn ensure_self_or_admin(account: &Account, target_id: Uuid) -> Result<(), AppError> {
    if account.role.is_admin() || account.id == target_id {
        return Ok(());
    }
    Err(AppError::AccessDenied)
}

pub fn ensure_self_or_sysadmin(account: &Account, target_id: Uuid) -> Result<(), AppError> {
    if account.role == Role::SysAdmin || account.id == target_id {
        return Ok(());
    }
    Err(AppError::AccessDenied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "x@uta.edu".into(),
            id_number: "1002000001".into(),
            name: "X".into(),
            role,
            grade_level: "Staff".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_sets() {
        assert!(AdminOnly::allowed().contains(&Role::Admin));
        assert!(AdminOnly::allowed().contains(&Role::SysAdmin));
        assert!(!AdminOnly::allowed().contains(&Role::Tutor));

        assert!(TutorOnly::allowed().contains(&Role::Tutor));
        assert!(!TutorOnly::allowed().contains(&Role::Admin));

        assert_eq!(SysAdminOnly::allowed(), &[Role::SysAdmin]);
    }

    #[test]
    fn self_or_admin() {
        let student = account(Role::Student);
        assert!(ensure_self_or_admin(&student, student.id).is_ok());
        assert!(ensure_self_or_admin(&student, Uuid::new_v4()).is_err());

        let admin = account(Role::Admin);
        assert!(ensure_self_or_admin(&admin, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn self_or_sysadmin() {
        let admin = account(Role::Admin);
        // Admin comum não passa pela checagem de SysAdmin
        assert!(ensure_self_or_sysadmin(&admin, Uuid::new_v4()).is_err());
        assert!(ensure_self_or_sysadmin(&admin, admin.id).is_ok());

        let sysadmin = account(Role::SysAdmin);
        assert!(ensure_self_or_sysadmin(&sysadmin, Uuid::new_v4()).is_ok());
    }
}
