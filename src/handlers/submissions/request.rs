//! Submission request DTOs

use serde::Deserialize;
use validator::Validate;

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    /// Problem to submit for
    pub problem_id: i32,

    /// Programming language, also the name of the judge queue
    #[validate(length(min = 1, max = 32))]
    pub language: String,

    /// Source code
    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub code: String,
}
