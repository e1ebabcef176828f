//! OnlineJudge - Submission Judging Backend
//!
//! This library provides the core of an online-judge backend: problems with
//! test cases, user submissions, and dispatch of submissions to external
//! language workers through per-language work queues.
//!
//! # Features
//!
//! - Problem editing with test-case reconciliation
//! - Judge payloads rebuilt from the current test cases on every dispatch
//! - Bounded reconnects when the work queue is unreachable
//! - Bulk and per-submission requeueing of unjudged submissions
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store / Repositories**: Transactional database access
//! - **Queue**: Work queue client
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queue;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
