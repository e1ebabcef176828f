//! Problem model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Problem database model
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: i32,
    pub title: String,
    pub description: String,
}
