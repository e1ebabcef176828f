//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH},
    models::{TestCaseFields, TestCaseSpec},
};

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub test_cases: Vec<TestCaseRequest>,
}

/// Update problem request.
///
/// `test_cases` is the complete new list: entries with an `id` keep that
/// test case, entries without one are added, and every test case left out
/// is deleted.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub test_cases: Vec<TestCaseRequest>,
}

/// Test case as sent by clients
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRequest {
    /// Present when the entry refers to an existing test case
    pub id: Option<i32>,
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub score: i32,
    pub timeout_seconds: f64,
}

impl TestCaseRequest {
    pub fn fields(&self) -> TestCaseFields {
        TestCaseFields {
            input: self.input.clone(),
            expected_output: self.expected_output.clone(),
            comment: self.comment.clone(),
            score: self.score,
            timeout_seconds: self.timeout_seconds,
        }
    }

    pub fn to_spec(&self) -> TestCaseSpec {
        match self.id {
            Some(id) => TestCaseSpec::Existing {
                id,
                fields: self.fields(),
            },
            None => TestCaseSpec::New(self.fields()),
        }
    }
}
