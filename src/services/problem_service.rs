//! Problem service

use crate::{
    db::Store,
    error::{AppError, AppResult},
    handlers::problems::{
        request::{CreateProblemRequest, TestCaseRequest, UpdateProblemRequest},
        response::{ProblemResponse, ProblemSummary, UpdateProblemResponse},
    },
    services::reconciler::{ProblemEdit, Reconciler},
    utils::validation::{validate_problem_title, validate_test_case},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// List problems
    pub async fn list_problems(store: &dyn Store) -> AppResult<Vec<ProblemSummary>> {
        let mut tx = store.begin().await?;
        let problems = tx.list_problems().await?;
        tx.commit().await?;

        Ok(problems.into_iter().map(ProblemSummary::from).collect())
    }

    /// Get problem by ID together with its test cases
    pub async fn get_problem(store: &dyn Store, id: i32) -> AppResult<ProblemResponse> {
        let mut tx = store.begin().await?;

        let problem = tx
            .find_problem(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;
        let test_cases = tx.list_test_cases(id).await?;

        tx.commit().await?;

        Ok(ProblemResponse::new(problem, test_cases))
    }

    /// Create a problem and its initial test cases in one transaction
    pub async fn create_problem(
        store: &dyn Store,
        payload: CreateProblemRequest,
    ) -> AppResult<ProblemResponse> {
        let title = validate_problem_title(&payload.title)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Self::check_test_cases(&payload.test_cases)?;

        if payload.test_cases.iter().any(|tc| tc.id.is_some()) {
            return Err(AppError::InvalidInput(
                "New problems cannot reference existing test cases".to_string(),
            ));
        }

        let mut tx = store.begin().await?;

        let problem = tx.insert_problem(&title, &payload.description).await?;

        let mut test_cases = Vec::with_capacity(payload.test_cases.len());
        for tc in &payload.test_cases {
            test_cases.push(tx.insert_test_case(problem.id, &tc.fields()).await?);
        }

        tx.commit().await?;

        tracing::info!(
            problem_id = problem.id,
            test_cases = test_cases.len(),
            "Created problem"
        );

        Ok(ProblemResponse::new(problem, test_cases))
    }

    /// Update a problem, reconciling its test cases against the request
    pub async fn update_problem(
        store: &dyn Store,
        id: i32,
        payload: UpdateProblemRequest,
    ) -> AppResult<UpdateProblemResponse> {
        let title = validate_problem_title(&payload.title)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Self::check_test_cases(&payload.test_cases)?;

        let edit = ProblemEdit {
            title,
            description: payload.description,
            test_cases: payload.test_cases.iter().map(TestCaseRequest::to_spec).collect(),
        };

        let summary = Reconciler::reconcile_problem(store, id, &edit).await?;
        let problem = Self::get_problem(store, id).await?;

        Ok(UpdateProblemResponse {
            problem,
            test_cases: summary,
        })
    }

    /// Delete a problem and all of its test cases
    pub async fn delete_problem(store: &dyn Store, id: i32) -> AppResult<()> {
        let mut tx = store.begin().await?;

        let removed_cases = tx.delete_all_test_cases(id).await?;
        if tx.delete_problem(id).await? == 0 {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        tx.commit().await?;

        tracing::info!(problem_id = id, test_cases = removed_cases, "Deleted problem");
        Ok(())
    }

    fn check_test_cases(test_cases: &[TestCaseRequest]) -> AppResult<()> {
        for tc in test_cases {
            validate_test_case(&tc.fields()).map_err(|e| AppError::Validation(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryStore;

    fn case(id: Option<i32>, input: &str) -> TestCaseRequest {
        TestCaseRequest {
            id,
            input: input.to_string(),
            expected_output: input.to_string(),
            comment: String::new(),
            score: 10,
            timeout_seconds: 1.0,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let created = ProblemService::create_problem(
            &store,
            CreateProblemRequest {
                title: " Echo ".to_string(),
                description: "Print the input".to_string(),
                test_cases: vec![case(None, "a"), case(None, "b")],
            },
        )
        .await
        .unwrap();

        assert_eq!(created.title, "Echo");
        assert_eq!(created.test_cases.len(), 2);

        let fetched = ProblemService::get_problem(&store, created.id).await.unwrap();
        let inputs: Vec<&str> = fetched.test_cases.iter().map(|t| t.input.as_str()).collect();
        assert_eq!(inputs, vec!["a", "b"]);

        let listed = ProblemService::list_problems(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_ids_and_bad_cases() {
        let store = MemoryStore::new();

        let with_id = CreateProblemRequest {
            title: "Echo".to_string(),
            description: String::new(),
            test_cases: vec![case(Some(1), "a")],
        };
        let err = ProblemService::create_problem(&store, with_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let mut bad = case(None, "a");
        bad.timeout_seconds = -1.0;
        let invalid = CreateProblemRequest {
            title: "Echo".to_string(),
            description: String::new(),
            test_cases: vec![bad],
        };
        let err = ProblemService::create_problem(&store, invalid).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(ProblemService::list_problems(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_reports_reconciliation() {
        let store = MemoryStore::new();
        store.seed_problem(101, "A+B");
        let kept = store.seed_test_case(101, "3 4", "7", 50, 10.0);
        store.seed_test_case(101, "1 1", "2", 50, 10.0);

        let response = ProblemService::update_problem(
            &store,
            101,
            UpdateProblemRequest {
                title: "A+B".to_string(),
                description: "Sum".to_string(),
                test_cases: vec![case(Some(kept.id), "3 4"), case(None, "5 5")],
            },
        )
        .await
        .unwrap();

        assert_eq!(response.test_cases.created, 1);
        assert_eq!(response.test_cases.updated, 1);
        assert_eq!(response.test_cases.deleted, 1);
        assert_eq!(response.problem.test_cases[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_delete_removes_test_cases() {
        let store = MemoryStore::new();
        store.seed_problem(101, "A+B");
        store.seed_test_case(101, "3 4", "7", 50, 10.0);

        ProblemService::delete_problem(&store, 101).await.unwrap();

        assert!(store.problem(101).is_none());
        assert!(store.test_cases(101).is_empty());

        let err = ProblemService::delete_problem(&store, 101).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
