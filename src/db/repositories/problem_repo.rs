//! Problem repository
//!
//! Test cases live here too: they are only ever addressed through their
//! problem.

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{Problem, TestCase, TestCaseFields},
};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    pub async fn create(conn: &mut PgConnection, title: &str, description: &str) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .fetch_one(&mut *conn)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(problem)
    }

    /// List all problems
    pub async fn list(conn: &mut PgConnection) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(problems)
    }

    /// Update title and description, returning the number of rows touched
    pub async fn update(
        conn: &mut PgConnection,
        id: i32,
        title: &str,
        description: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE problems
            SET title = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete problem
    pub async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Create test case
    pub async fn create_test_case(
        conn: &mut PgConnection,
        problem_id: i32,
        fields: &TestCaseFields,
    ) -> AppResult<TestCase> {
        let test_case = sqlx::query_as::<_, TestCase>(
            r#"
            INSERT INTO test_cases (problem_id, input, expected_output, comment, score, timeout_seconds)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(problem_id)
        .bind(&fields.input)
        .bind(&fields.expected_output)
        .bind(&fields.comment)
        .bind(fields.score)
        .bind(fields.timeout_seconds)
        .fetch_one(&mut *conn)
        .await?;

        Ok(test_case)
    }

    /// Get test cases for problem in natural row order
    pub async fn get_test_cases(conn: &mut PgConnection, problem_id: i32) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"SELECT * FROM test_cases WHERE problem_id = $1 ORDER BY id"#,
        )
        .bind(problem_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(test_cases)
    }

    /// Get test cases for several problems at once
    pub async fn get_test_cases_for_problems(
        conn: &mut PgConnection,
        problem_ids: &[i32],
    ) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"SELECT * FROM test_cases WHERE problem_id = ANY($1) ORDER BY problem_id, id"#,
        )
        .bind(problem_ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(test_cases)
    }

    /// Overwrite the fields of a test case owned by `problem_id`
    pub async fn update_test_case(
        conn: &mut PgConnection,
        problem_id: i32,
        id: i32,
        fields: &TestCaseFields,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE test_cases
            SET
                input = $3,
                expected_output = $4,
                comment = $5,
                score = $6,
                timeout_seconds = $7
            WHERE id = $1 AND problem_id = $2
            "#,
        )
        .bind(id)
        .bind(problem_id)
        .bind(&fields.input)
        .bind(&fields.expected_output)
        .bind(&fields.comment)
        .bind(fields.score)
        .bind(fields.timeout_seconds)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete the listed test cases of a problem
    pub async fn delete_test_cases(
        conn: &mut PgConnection,
        problem_id: i32,
        ids: &[i32],
    ) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM test_cases WHERE problem_id = $1 AND id = ANY($2)"#)
            .bind(problem_id)
            .bind(ids)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete every test case of a problem
    pub async fn delete_all_test_cases(conn: &mut PgConnection, problem_id: i32) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM test_cases WHERE problem_id = $1"#)
            .bind(problem_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
