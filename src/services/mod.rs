//! Business logic services
//!
//! Services hold the application's business rules. Handlers call them,
//! and they talk to storage through the transactional store.

pub mod auth_service;
pub mod dispatcher;
pub mod problem_service;
pub mod reconciler;
pub mod requeue_service;
pub mod submission_service;

pub use auth_service::AuthService;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use problem_service::ProblemService;
pub use reconciler::{ProblemEdit, ReconcilePlan, ReconcileSummary, Reconciler};
pub use requeue_service::{RequeueService, SweepReport};
pub use submission_service::SubmissionService;
