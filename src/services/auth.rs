// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProfileRepository,
    models::auth::{Claims, Profile},
};

#[derive(Clone)]
pub struct AuthService {
    profile_repo: ProfileRepository,
    jwt_secret: String,
    jwt_expiration_days: i64,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        profile_repo: ProfileRepository,
        jwt_secret: String,
        jwt_expiration_days: i64,
        pool: PgPool,
    ) -> Self {
        Self { profile_repo, jwt_secret, jwt_expiration_days, pool }
    }

    /// Cria credenciais + perfil ('employee', ativo) e devolve o token.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<String, AppError> {
        let email = email.trim().to_lowercase();

        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Usuário e perfil entram juntos ou não entram
        let mut tx = self.pool.begin().await?;

        let user = self
            .profile_repo
            .create_user(&mut *tx, &email, &hashed_password)
            .await?;

        let profile = self
            .profile_repo
            .create_profile(&mut *tx, user.id, &email, full_name.trim())
            .await?;

        tx.commit().await?;

        tracing::info!("Novo colaborador registrado: {}", profile.id);

        // 3. Gera o token
        self.create_token(profile.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .profile_repo
            .find_user_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    /// Token válido + perfil existente. Qualquer falha vira 401.
    pub async fn validate_token(&self, token: &str) -> Result<Profile, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        self.profile_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::ProfileNotFound)
    }

    fn create_token(&self, profile_id: Uuid) -> Result<String, AppError> {
        issue_token(&self.jwt_secret, profile_id, Utc::now(), self.jwt_expiration_days)
    }
}

pub fn issue_token(
    secret: &str,
    profile_id: Uuid,
    now: DateTime<Utc>,
    expiration_days: i64,
) -> Result<String, AppError> {
    let expires_at = Duration::try_days(expiration_days)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| anyhow::anyhow!("Validade de token fora do intervalo: {} dias", expiration_days))?;

    let claims = Claims {
        sub: profile_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_keeps_the_profile_id() {
        let id = Uuid::new_v4();
        let token = issue_token(SECRET, id, Utc::now(), 7).unwrap();

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token("other-secret", Uuid::new_v4(), Utc::now(), 7).unwrap();
        assert!(matches!(decode_token(SECRET, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - Duration::days(10);
        let token = issue_token(SECRET, Uuid::new_v4(), issued, 7).unwrap();
        assert!(matches!(decode_token(SECRET, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn absurd_lifetime_is_an_error() {
        let result = issue_token(SECRET, Uuid::new_v4(), Utc::now(), i64::MAX);
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode_token(SECRET, "not-a-jwt"), Err(AppError::InvalidToken)));
    }
}
