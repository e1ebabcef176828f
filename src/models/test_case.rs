//! Test case model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Test case database model
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TestCase {
    pub id: i32,
    pub problem_id: i32,
    pub input: String,
    pub expected_output: String,
    pub comment: String,
    pub score: i32,
    pub timeout_seconds: f64,
}

/// The editable part of a test case (everything but identity and ownership)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseFields {
    pub input: String,
    pub expected_output: String,
    pub comment: String,
    pub score: i32,
    pub timeout_seconds: f64,
}

/// One entry of an incoming test-case edit.
///
/// `New` rows are created under the edited problem; `Existing` rows are
/// updated in place and keep their id and owner.
#[derive(Debug, Clone, PartialEq)]
pub enum TestCaseSpec {
    New(TestCaseFields),
    Existing { id: i32, fields: TestCaseFields },
}

impl TestCase {
    /// Copy of the editable fields
    pub fn fields(&self) -> TestCaseFields {
        TestCaseFields {
            input: self.input.clone(),
            expected_output: self.expected_output.clone(),
            comment: self.comment.clone(),
            score: self.score,
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// Spec that leaves this row exactly as it is
    pub fn to_spec(&self) -> TestCaseSpec {
        TestCaseSpec::Existing {
            id: self.id,
            fields: self.fields(),
        }
    }
}
