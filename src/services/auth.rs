// src/services/auth.rs

use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::AccountRepository,
    models::account::Account,
};

// O provedor de identidade é externo: daqui só consumimos a capacidade
// "verificar token -> e-mail". A trait existe para os testes substituírem
// a verificação real.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<String, AppError>;
}

// Claims mínimas que o provedor coloca no token (o `exp` é validado pela
// própria biblioteca, não precisa aparecer aqui)
#[derive(Debug, Deserialize)]
struct IdentityClaims {
    email: String,
}

// Verificação via JWT assinado com o segredo compartilhado do provedor.
// `Validation::default()` já exige HS256 e `exp` válido: token expirado
// vira 401, nunca redirect.
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<String, AppError> {
        let validation = Validation::default();
        let token_data = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims.email)
    }
}

#[derive(Clone)]
pub struct AuthService {
    account_repo: AccountRepository,
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthService {
    pub fn new(account_repo: AccountRepository, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            account_repo,
            verifier,
        }
    }

    // Token -> e-mail verificado -> conta. E-mail válido sem conta
    // cadastrada também é 401: o cadastro é um passo separado.
    pub async fn authenticate(&self, token: &str) -> Result<Account, AppError> {
        let email = self.verifier.verify(token).await?;

        self.account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::AccountNotRegistered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        email: String,
        exp: usize,
    }

    fn token_for(email: &str, exp: usize, secret: &str) -> String {
        encode(
            &Header::default(),
            &TestClaims {
                email: email.to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn valid_token_yields_email() {
        let verifier = JwtVerifier::new("segredo".into());
        let token = token_for("aluno@mavs.uta.edu", far_future(), "segredo");

        let email = verifier.verify(&token).await.unwrap();
        assert_eq!(email, "aluno@mavs.uta.edu");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let verifier = JwtVerifier::new("segredo".into());
        let token = token_for("aluno@mavs.uta.edu", 1_000, "segredo");

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let verifier = JwtVerifier::new("segredo".into());
        let token = token_for("aluno@mavs.uta.edu", far_future(), "outro-segredo");

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
