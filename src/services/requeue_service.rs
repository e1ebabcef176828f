//! Requeue service
//!
//! Sends submissions that still lack a result back to the judge, either one
//! at a time on behalf of their owner or all at once.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{JudgePayload, TestCase},
    services::dispatcher::{DispatchOutcome, Dispatcher},
};

/// Result of a successful sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Submissions found without a result
    pub unjudged: usize,
    pub dispatched: usize,
    pub skipped_no_test_cases: usize,
    /// Distinct problems the unjudged submissions belong to
    pub problems: usize,
}

/// Requeue service
pub struct RequeueService;

impl RequeueService {
    /// Dispatch every unjudged submission against its problem's current
    /// test cases.
    ///
    /// Stops at the first queue failure and returns it; submissions
    /// dispatched before that stay queued.
    pub async fn sweep(store: &dyn Store, dispatcher: &Dispatcher) -> AppResult<SweepReport> {
        let mut tx = store.begin().await?;

        let unjudged = tx.list_unjudged_submissions().await?;
        let problem_ids: Vec<i32> = unjudged
            .iter()
            .map(|s| s.problem_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let test_cases = if problem_ids.is_empty() {
            Vec::new()
        } else {
            tx.list_test_cases_for(&problem_ids).await?
        };

        tx.commit().await?;

        let mut by_problem: HashMap<i32, Vec<TestCase>> = HashMap::new();
        for tc in test_cases {
            by_problem.entry(tc.problem_id).or_default().push(tc);
        }

        let mut report = SweepReport {
            unjudged: unjudged.len(),
            problems: problem_ids.len(),
            ..Default::default()
        };

        tracing::info!(
            unjudged = report.unjudged,
            problems = report.problems,
            "Sweeping unjudged submissions"
        );

        for submission in &unjudged {
            let cases = by_problem
                .get(&submission.problem_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let payload = JudgePayload::build(submission, cases);

            match dispatcher.dispatch(&payload).await {
                Ok(DispatchOutcome::Queued) => report.dispatched += 1,
                Ok(DispatchOutcome::SkippedNoTestCases) => report.skipped_no_test_cases += 1,
                Err(e) => {
                    tracing::error!(
                        submission_id = submission.id,
                        dispatched = report.dispatched,
                        remaining = report.unjudged - report.dispatched - report.skipped_no_test_cases,
                        error = %e,
                        "Sweep aborted"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            dispatched = report.dispatched,
            skipped = report.skipped_no_test_cases,
            "Sweep finished"
        );

        Ok(report)
    }

    /// Dispatch one submission again on behalf of its owner
    pub async fn restart(
        store: &dyn Store,
        dispatcher: &Dispatcher,
        submission_id: i32,
        user_id: i32,
    ) -> AppResult<DispatchOutcome> {
        let mut tx = store.begin().await?;

        let submission = tx
            .find_submission(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if !submission.is_owned_by(user_id) {
            return Err(AppError::Unauthorized);
        }

        let test_cases = tx.list_test_cases(submission.problem_id).await?;
        tx.commit().await?;

        tracing::info!(submission_id, user_id, "Restarting submission");

        let payload = JudgePayload::build(&submission, &test_cases);
        dispatcher.dispatch(&payload).await
    }
}
