//! Database repositories
//!
//! Repositories hold the SQL. They take a bare connection so the caller
//! decides which transaction they run in.

pub mod problem_repo;
pub mod submission_repo;
pub mod user_repo;

pub use problem_repo::ProblemRepository;
pub use submission_repo::SubmissionRepository;
pub use user_repo::UserRepository;
