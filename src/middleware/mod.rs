//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{optional_auth_middleware, AuthenticatedUser};
pub use logging::logging_middleware;
