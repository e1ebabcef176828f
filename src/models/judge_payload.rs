//! Judge payload model
//!
//! The record a language worker pops off its queue. It is rebuilt from the
//! submission and the problem's current test cases on every dispatch and is
//! never persisted.

use serde::{Deserialize, Serialize};

use super::{Submission, TestCase};

/// Wire record consumed by the judge workers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgePayload {
    pub submission_id: i32,
    pub language: String,
    pub code: String,
    pub test_cases: Vec<JudgeTestCase>,
}

/// Test case as seen by a worker (no id, no comment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeTestCase {
    pub input: String,
    pub expected_output: String,
    pub score: i32,
    pub timeout_seconds: f64,
}

impl JudgePayload {
    /// Assemble the payload for `submission` from its problem's test cases,
    /// keeping their order.
    pub fn build(submission: &Submission, test_cases: &[TestCase]) -> Self {
        debug_assert!(
            test_cases.iter().all(|tc| tc.problem_id == submission.problem_id),
            "test cases must belong to the submission's problem"
        );

        Self {
            submission_id: submission.id,
            language: submission.language.clone(),
            code: submission.code.clone(),
            test_cases: test_cases.iter().map(JudgeTestCase::from).collect(),
        }
    }

    /// Nothing to judge
    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// Name of the queue this payload belongs on (the language, verbatim)
    pub fn queue_key(&self) -> &str {
        &self.language
    }

    /// Serialize to the JSON bytes pushed onto the queue
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl From<&TestCase> for JudgeTestCase {
    fn from(tc: &TestCase) -> Self {
        Self {
            input: tc.input.clone(),
            expected_output: tc.expected_output.clone(),
            score: tc.score,
            timeout_seconds: tc.timeout_seconds,
        }
    }
}
