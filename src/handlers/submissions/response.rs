//! Submission response DTOs

use serde::Serialize;

use crate::{
    models::Submission,
    services::{dispatcher::DispatchOutcome, requeue_service::SweepReport},
};

/// Submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i32,
    pub language: String,
    pub code: String,
    pub executed_time: f64,
    pub result: String,
    pub problem_id: i32,
    pub user_id: i32,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            language: s.language,
            code: s.code,
            executed_time: s.executed_time,
            result: s.result,
            problem_id: s.problem_id,
            user_id: s.user_id,
        }
    }
}

/// Receipt for a new submission.
///
/// `queued` is false when the judge queue could not take the payload; the
/// submission stays unjudged and is picked up by the next sweep.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionResponse {
    pub submission_id: i32,
    pub queued: bool,
}

/// Restart result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartResponse {
    pub submission_id: i32,
    pub outcome: DispatchOutcome,
}

/// Sweep result
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub report: SweepReport,
}
