//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod problems;
pub mod submissions;
pub mod users;

use axum::{middleware, Router};

use crate::{
    constants::API_BASE_PATH,
    middleware::{logging_middleware, optional_auth_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/users", users::routes())
        .nest("/problems", problems::routes())
        .nest("/submissions", submissions::routes())
}

/// Build the application router with authentication and request logging
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE_PATH, routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ))
        .with_state(state)
}
