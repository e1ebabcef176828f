//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub authority: i32,
}

/// Values needed to persist a fresh user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub authority: i32,
}
