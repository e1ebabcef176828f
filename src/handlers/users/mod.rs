//! User account handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::register))
        .route("/login", post(handler::login))
        .route("/me", get(handler::get_current_user))
}
