//! Submission handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{RequeueService, SubmissionService},
    state::AppState,
};

use super::{
    request::CreateSubmissionRequest,
    response::{CreateSubmissionResponse, RestartResponse, SubmissionResponse, SweepResponse},
};

/// Create a new submission
pub async fn create_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    auth_user.require_normal()?;
    payload.validate()?;

    let receipt = SubmissionService::create_submission(
        state.store(),
        state.dispatcher(),
        auth_user.id,
        payload,
    )
    .await?;

    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

/// Get a specific submission
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SubmissionResponse>> {
    auth_user.require_normal()?;

    let submission = SubmissionService::get_submission(state.store(), id, auth_user.id).await?;
    Ok(Json(submission))
}

/// Send one of the caller's submissions back to the judge
pub async fn restart_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RestartResponse>> {
    auth_user.require_normal()?;

    let outcome =
        RequeueService::restart(state.store(), state.dispatcher(), id, auth_user.id).await?;

    Ok(Json(RestartResponse {
        submission_id: id,
        outcome,
    }))
}

/// Send every unjudged submission back to the judge
pub async fn sweep_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<SweepResponse>> {
    auth_user.require_privileged()?;

    let report = RequeueService::sweep(state.store(), state.dispatcher()).await?;

    Ok(Json(SweepResponse { report }))
}
