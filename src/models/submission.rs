//! Submission model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::submissions::NO_RESULT;

/// Submission database model
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i32,
    pub language: String,
    pub code: String,
    /// Seconds reported by the judge, `-1.0` until judged
    pub executed_time: f64,
    /// Judge verdict, `"-"` until judged
    pub result: String,
    pub problem_id: i32,
    pub user_id: i32,
}

impl Submission {
    /// Check if the judge has reported on this submission
    pub fn is_judged(&self) -> bool {
        self.result != NO_RESULT
    }

    /// Check if `user_id` owns this submission
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Values needed to persist a fresh submission
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub language: String,
    pub code: String,
    pub problem_id: i32,
    pub user_id: i32,
}
