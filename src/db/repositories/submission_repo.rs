//! Submission repository

use sqlx::PgConnection;

use crate::{
    constants::submissions::{NO_RESULT, UNJUDGED_EXECUTED_TIME},
    error::AppResult,
    models::{NewSubmission, Submission},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new, unjudged submission
    pub async fn create(conn: &mut PgConnection, new: &NewSubmission) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (language, code, executed_time, result, problem_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.language)
        .bind(&new.code)
        .bind(UNJUDGED_EXECUTED_TIME)
        .bind(NO_RESULT)
        .bind(new.problem_id)
        .bind(new.user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(submission)
    }

    /// Get submissions still carrying the given result
    pub async fn list_by_result(conn: &mut PgConnection, result: &str) -> AppResult<Vec<Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE result = $1
            ORDER BY id
            "#,
        )
        .bind(result)
        .fetch_all(&mut *conn)
        .await?;

        Ok(submissions)
    }
}
