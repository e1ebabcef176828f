//! Problem handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::ProblemService,
    state::AppState,
};

use super::{
    request::{CreateProblemRequest, UpdateProblemRequest},
    response::{ProblemResponse, ProblemsListResponse, UpdateProblemResponse},
};

/// List all problems
pub async fn list_problems(State(state): State<AppState>) -> AppResult<Json<ProblemsListResponse>> {
    let problems = ProblemService::list_problems(state.store()).await?;
    Ok(Json(ProblemsListResponse { problems }))
}

/// Create a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    auth_user.require_privileged()?;
    payload.validate()?;

    let problem = ProblemService::create_problem(state.store(), payload).await?;

    Ok((StatusCode::CREATED, Json(problem)))
}

/// Get a specific problem
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = ProblemService::get_problem(state.store(), id).await?;
    Ok(Json(problem))
}

/// Update a problem and reconcile its test cases
pub async fn update_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProblemRequest>,
) -> AppResult<Json<UpdateProblemResponse>> {
    auth_user.require_privileged()?;
    payload.validate()?;

    let response = ProblemService::update_problem(state.store(), id, payload).await?;

    Ok(Json(response))
}

/// Delete a problem
pub async fn delete_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    auth_user.require_privileged()?;

    ProblemService::delete_problem(state.store(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
