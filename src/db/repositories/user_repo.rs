//! User repository

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{NewUser, User},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(conn: &mut PgConnection, new: &NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, name, email, authority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.authority)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(conn: &mut PgConnection, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }
}
