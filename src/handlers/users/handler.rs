//! User handler implementations

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
    utils::validation::{validate_password, validate_username},
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{AuthResponse, RegisterResponse, UserResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;
    validate_username(&payload.username).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_password(&payload.password).map_err(|e| AppError::Validation(e.to_string()))?;

    let user = AuthService::register(
        state.store(),
        &payload.username,
        &payload.password,
        &payload.name,
        &payload.email,
    )
    .await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, access_token, expires_in) = AuthService::login(
        state.store(),
        state.config(),
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: user.into(),
    }))
}

/// Get the current user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let user = AuthService::get_user_by_id(state.store(), auth_user.id).await?;
    Ok(Json(user.into()))
}
