//! Problem response DTOs

use serde::Serialize;

use crate::{
    models::{Problem, TestCase},
    services::reconciler::ReconcileSummary,
};

/// Problem with its test cases
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub test_cases: Vec<TestCaseResponse>,
}

impl ProblemResponse {
    pub fn new(problem: Problem, test_cases: Vec<TestCase>) -> Self {
        Self {
            id: problem.id,
            title: problem.title,
            description: problem.description,
            test_cases: test_cases.into_iter().map(TestCaseResponse::from).collect(),
        }
    }
}

/// Problem summary for list views
#[derive(Debug, Serialize)]
pub struct ProblemSummary {
    pub id: i32,
    pub title: String,
}

impl From<Problem> for ProblemSummary {
    fn from(problem: Problem) -> Self {
        Self {
            id: problem.id,
            title: problem.title,
        }
    }
}

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemSummary>,
}

/// Test case response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResponse {
    pub id: i32,
    pub input: String,
    pub expected_output: String,
    pub comment: String,
    pub score: i32,
    pub timeout_seconds: f64,
}

impl From<TestCase> for TestCaseResponse {
    fn from(tc: TestCase) -> Self {
        Self {
            id: tc.id,
            input: tc.input,
            expected_output: tc.expected_output,
            comment: tc.comment,
            score: tc.score,
            timeout_seconds: tc.timeout_seconds,
        }
    }
}

/// Update result: the problem as stored plus what changed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemResponse {
    pub problem: ProblemResponse,
    pub test_cases: ReconcileSummary,
}
