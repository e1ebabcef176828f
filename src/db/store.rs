//! Transactional store interface
//!
//! Services talk to storage only through [`Store`] and [`StoreTx`]. Every
//! unit of work opens a transaction, runs typed queries on it and commits;
//! a transaction dropped without [`StoreTx::commit`] is rolled back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    constants::submissions::NO_RESULT,
    db::repositories::{ProblemRepository, SubmissionRepository, UserRepository},
    error::AppResult,
    models::{NewSubmission, NewUser, Problem, Submission, TestCase, TestCaseFields, User},
};

/// Entry point to the relational store
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>>;

    /// Liveness check
    async fn ping(&self) -> AppResult<()>;
}

/// Queries available inside one transaction.
///
/// Test-case lists come back in natural row order (ascending id).
#[async_trait]
pub trait StoreTx: Send {
    // Problems
    async fn list_problems(&mut self) -> AppResult<Vec<Problem>>;
    async fn find_problem(&mut self, id: i32) -> AppResult<Option<Problem>>;
    async fn insert_problem(&mut self, title: &str, description: &str) -> AppResult<Problem>;
    /// Returns the number of rows touched (0 when the problem does not exist)
    async fn update_problem(&mut self, id: i32, title: &str, description: &str) -> AppResult<u64>;
    async fn delete_problem(&mut self, id: i32) -> AppResult<u64>;

    // Test cases
    async fn list_test_cases(&mut self, problem_id: i32) -> AppResult<Vec<TestCase>>;
    /// Test cases of several problems in one round trip, grouped by problem
    async fn list_test_cases_for(&mut self, problem_ids: &[i32]) -> AppResult<Vec<TestCase>>;
    async fn insert_test_case(&mut self, problem_id: i32, fields: &TestCaseFields) -> AppResult<TestCase>;
    /// Returns 0 when no test case `id` belongs to `problem_id`
    async fn update_test_case(&mut self, problem_id: i32, id: i32, fields: &TestCaseFields) -> AppResult<u64>;
    async fn delete_test_cases(&mut self, problem_id: i32, ids: &[i32]) -> AppResult<u64>;
    async fn delete_all_test_cases(&mut self, problem_id: i32) -> AppResult<u64>;

    // Submissions
    async fn insert_submission(&mut self, new: &NewSubmission) -> AppResult<Submission>;
    async fn find_submission(&mut self, id: i32) -> AppResult<Option<Submission>>;
    /// Submissions still carrying the no-result sentinel, by ascending id
    async fn list_unjudged_submissions(&mut self) -> AppResult<Vec<Submission>>;

    // Users
    async fn insert_user(&mut self, new: &NewUser) -> AppResult<User>;
    async fn find_user(&mut self, id: i32) -> AppResult<Option<User>>;
    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>>;

    /// Make every write of this transaction durable
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// PostgreSQL store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTx { tx }))
    }

    async fn ping(&self) -> AppResult<()> {
        super::test_connection(&self.pool).await?;
        Ok(())
    }
}

/// Open PostgreSQL transaction
pub struct PgStoreTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgStoreTx {
    async fn list_problems(&mut self) -> AppResult<Vec<Problem>> {
        ProblemRepository::list(&mut self.tx).await
    }

    async fn find_problem(&mut self, id: i32) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(&mut self.tx, id).await
    }

    async fn insert_problem(&mut self, title: &str, description: &str) -> AppResult<Problem> {
        ProblemRepository::create(&mut self.tx, title, description).await
    }

    async fn update_problem(&mut self, id: i32, title: &str, description: &str) -> AppResult<u64> {
        ProblemRepository::update(&mut self.tx, id, title, description).await
    }

    async fn delete_problem(&mut self, id: i32) -> AppResult<u64> {
        ProblemRepository::delete(&mut self.tx, id).await
    }

    async fn list_test_cases(&mut self, problem_id: i32) -> AppResult<Vec<TestCase>> {
        ProblemRepository::get_test_cases(&mut self.tx, problem_id).await
    }

    async fn list_test_cases_for(&mut self, problem_ids: &[i32]) -> AppResult<Vec<TestCase>> {
        ProblemRepository::get_test_cases_for_problems(&mut self.tx, problem_ids).await
    }

    async fn insert_test_case(&mut self, problem_id: i32, fields: &TestCaseFields) -> AppResult<TestCase> {
        ProblemRepository::create_test_case(&mut self.tx, problem_id, fields).await
    }

    async fn update_test_case(&mut self, problem_id: i32, id: i32, fields: &TestCaseFields) -> AppResult<u64> {
        ProblemRepository::update_test_case(&mut self.tx, problem_id, id, fields).await
    }

    async fn delete_test_cases(&mut self, problem_id: i32, ids: &[i32]) -> AppResult<u64> {
        ProblemRepository::delete_test_cases(&mut self.tx, problem_id, ids).await
    }

    async fn delete_all_test_cases(&mut self, problem_id: i32) -> AppResult<u64> {
        ProblemRepository::delete_all_test_cases(&mut self.tx, problem_id).await
    }

    async fn insert_submission(&mut self, new: &NewSubmission) -> AppResult<Submission> {
        SubmissionRepository::create(&mut self.tx, new).await
    }

    async fn find_submission(&mut self, id: i32) -> AppResult<Option<Submission>> {
        SubmissionRepository::find_by_id(&mut self.tx, id).await
    }

    async fn list_unjudged_submissions(&mut self) -> AppResult<Vec<Submission>> {
        SubmissionRepository::list_by_result(&mut self.tx, NO_RESULT).await
    }

    async fn insert_user(&mut self, new: &NewUser) -> AppResult<User> {
        UserRepository::create(&mut self.tx, new).await
    }

    async fn find_user(&mut self, id: i32) -> AppResult<Option<User>> {
        UserRepository::find_by_id(&mut self.tx, id).await
    }

    async fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(&mut self.tx, username).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
