//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    constants::authority,
    db::Store,
    error::{AppError, AppResult},
    models::{NewUser, User},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub authority: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user with normal authority
    pub async fn register(
        store: &dyn Store,
        username: &str,
        password: &str,
        name: &str,
        email: &str,
    ) -> AppResult<User> {
        let mut tx = store.begin().await?;

        if tx.find_user_by_username(username).await?.is_some() {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        let user = tx
            .insert_user(&NewUser {
                username: username.to_string(),
                password_hash,
                name: name.to_string(),
                email: email.to_string(),
                authority: authority::NORMAL,
            })
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Login with username and password
    pub async fn login(
        store: &dyn Store,
        config: &Config,
        username: &str,
        password: &str,
    ) -> AppResult<(User, String, i64)> {
        let mut tx = store.begin().await?;
        let user = tx
            .find_user_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        tx.commit().await?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let (access_token, expires_in) = Self::generate_access_token(&user, config)?;

        Ok((user, access_token, expires_in))
    }

    /// Get user by ID
    pub async fn get_user_by_id(store: &dyn Store, user_id: i32) -> AppResult<User> {
        let mut tx = store.begin().await?;
        let user = tx
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tx.commit().await?;
        Ok(user)
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    pub fn generate_access_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            authority: user.authority,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_config, MemoryStore};

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let config = test_config();

        let user = AuthService::register(&store, "alice", "correct horse", "Alice", "a@example.com")
            .await
            .unwrap();
        assert_eq!(user.authority, authority::NORMAL);
        assert_ne!(user.password_hash, "correct horse");

        let (logged_in, token, expires_in) =
            AuthService::login(&store, &config, "alice", "correct horse").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(expires_in, 3600);

        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.authority, authority::NORMAL);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        AuthService::register(&store, "bob", "password1", "Bob", "b@example.com")
            .await
            .unwrap();

        let err = AuthService::register(&store, "bob", "password2", "Bob", "b@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let store = MemoryStore::new();
        let config = test_config();
        AuthService::register(&store, "carol", "password1", "Carol", "c@example.com")
            .await
            .unwrap();

        let wrong = AuthService::login(&store, &config, "carol", "password2").await.unwrap_err();
        assert!(matches!(wrong, AppError::InvalidCredentials));

        let unknown = AuthService::login(&store, &config, "dave", "password1").await.unwrap_err();
        assert!(matches!(unknown, AppError::InvalidCredentials));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let user = User {
            id: 3,
            username: "eve".to_string(),
            password_hash: String::new(),
            name: String::new(),
            email: String::new(),
            authority: authority::PRIVILEGED,
        };
        let (token, _) = AuthService::generate_access_token(&user, &config).unwrap();

        let err = AuthService::verify_token(&token, "another-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
