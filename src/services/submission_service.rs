//! Submission service

use crate::{
    db::Store,
    error::{AppError, AppResult},
    handlers::submissions::{
        request::CreateSubmissionRequest,
        response::{CreateSubmissionResponse, SubmissionResponse},
    },
    models::{JudgePayload, NewSubmission},
    services::dispatcher::{DispatchOutcome, Dispatcher},
    utils::validation::{validate_language, validate_source_code},
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Store a new submission and hand it to the judge.
    ///
    /// The submission is committed before dispatch. An unreachable queue is
    /// logged and reported through `queued`; any other dispatch error fails
    /// the request.
    pub async fn create_submission(
        store: &dyn Store,
        dispatcher: &Dispatcher,
        user_id: i32,
        payload: CreateSubmissionRequest,
    ) -> AppResult<CreateSubmissionResponse> {
        validate_language(&payload.language).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_source_code(&payload.code).map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = store.begin().await?;

        if tx.find_problem(payload.problem_id).await?.is_none() {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        let submission = tx
            .insert_submission(&NewSubmission {
                language: payload.language,
                code: payload.code,
                problem_id: payload.problem_id,
                user_id,
            })
            .await?;
        let test_cases = tx.list_test_cases(submission.problem_id).await?;

        tx.commit().await?;

        tracing::info!(
            submission_id = submission.id,
            problem_id = submission.problem_id,
            user_id,
            language = %submission.language,
            "Created submission"
        );

        let judge_payload = JudgePayload::build(&submission, &test_cases);
        let queued = queued_after(submission.id, dispatcher.dispatch(&judge_payload).await)?;

        Ok(CreateSubmissionResponse {
            submission_id: submission.id,
            queued,
        })
    }

    /// Get a submission owned by `user_id`
    pub async fn get_submission(
        store: &dyn Store,
        id: i32,
        user_id: i32,
    ) -> AppResult<SubmissionResponse> {
        let mut tx = store.begin().await?;
        let submission = tx
            .find_submission(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        tx.commit().await?;

        if !submission.is_owned_by(user_id) {
            return Err(AppError::Unauthorized);
        }

        Ok(submission.into())
    }
}

/// Whether a dispatch result left the submission queued.
///
/// Queue failures leave the submission unjudged for the next sweep.
fn queued_after(submission_id: i32, result: AppResult<DispatchOutcome>) -> AppResult<bool> {
    match result {
        Ok(DispatchOutcome::Queued) => Ok(true),
        Ok(DispatchOutcome::SkippedNoTestCases) => Ok(false),
        Err(e) if e.is_queue_failure() => {
            tracing::warn!(
                submission_id,
                error = %e,
                "Judge queue unavailable, submission left for the next sweep"
            );
            Ok(false)
        }
        Err(e) => {
            tracing::error!(submission_id, error = %e, "Dispatch failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        constants::submissions::{NO_RESULT, UNJUDGED_EXECUTED_TIME},
        test_utils::{test_config, MemoryQueue, MemoryStore},
    };

    fn request(problem_id: i32) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            problem_id,
            language: "kotlin".to_string(),
            code: "fun main() {}".to_string(),
        }
    }

    fn dispatcher(queue: &Arc<MemoryQueue>) -> Dispatcher {
        Dispatcher::from_config(queue.clone(), &test_config().dispatch)
    }

    #[tokio::test]
    async fn test_create_stores_sentinels_and_dispatches() {
        let store = MemoryStore::new();
        store.seed_problem(101, "A+B");
        store.seed_test_case(101, "3 4", "7", 50, 10.0);
        let queue = Arc::new(MemoryQueue::new());

        let receipt = SubmissionService::create_submission(&store, &dispatcher(&queue), 1, request(101))
            .await
            .unwrap();

        assert!(receipt.queued);
        let stored = store.submission(receipt.submission_id).unwrap();
        assert_eq!(stored.result, NO_RESULT);
        assert_eq!(stored.executed_time, UNJUDGED_EXECUTED_TIME);

        let payloads = queue.payloads("kotlin");
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].submission_id, receipt.submission_id);
    }

    #[tokio::test]
    async fn test_create_survives_queue_outage() {
        let store = MemoryStore::new();
        store.seed_problem(101, "A+B");
        store.seed_test_case(101, "3 4", "7", 50, 10.0);
        let queue = Arc::new(MemoryQueue::unavailable());

        let receipt = SubmissionService::create_submission(&store, &dispatcher(&queue), 1, request(101))
            .await
            .unwrap();

        assert!(!receipt.queued);
        assert!(!store.submission(receipt.submission_id).unwrap().is_judged());
    }

    #[tokio::test]
    async fn test_create_for_unknown_problem() {
        let store = MemoryStore::new();
        let queue = Arc::new(MemoryQueue::new());

        let err = SubmissionService::create_submission(&store, &dispatcher(&queue), 1, request(404))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(queue.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_owner_only() {
        let store = MemoryStore::new();
        store.seed_submission(5, 101, 1, "kotlin");

        let own = SubmissionService::get_submission(&store, 5, 1).await.unwrap();
        assert_eq!(own.id, 5);

        let err = SubmissionService::get_submission(&store, 5, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = SubmissionService::get_submission(&store, 6, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_only_queue_failures_become_unqueued() {
        assert!(queued_after(1, Ok(DispatchOutcome::Queued)).unwrap());
        assert!(!queued_after(1, Ok(DispatchOutcome::SkippedNoTestCases)).unwrap());
        assert!(!queued_after(1, Err(AppError::QueueUnavailable("down".to_string()))).unwrap());

        let err = queued_after(1, Err(AppError::Serialization("bad payload".to_string()))).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
