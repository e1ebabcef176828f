//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a pooled connection, in milliseconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

/// Default server-side statement timeout, in milliseconds
pub const DEFAULT_DATABASE_STATEMENT_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

/// User authority levels
pub mod authority {
    /// No authority (never granted on registration)
    pub const NONE: i32 = 0;
    /// Regular user: may submit and restart own submissions
    pub const NORMAL: i32 = 1;
    /// Lowest privileged level: may manage problems and sweep the queue
    pub const PRIVILEGED: i32 = 2;
}

// =============================================================================
// DISPATCH DEFAULTS
// =============================================================================

/// Default upper bound for a single queue call, in milliseconds
pub const DEFAULT_QUEUE_TIMEOUT_MS: u64 = 3_000;

/// Default number of reconnect attempts after a failed liveness probe
pub const DEFAULT_QUEUE_MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Default base backoff between reconnect attempts, in milliseconds
pub const DEFAULT_QUEUE_BASE_BACKOFF_MS: u64 = 100;

/// Default backoff ceiling between reconnect attempts, in milliseconds
pub const DEFAULT_QUEUE_MAX_BACKOFF_MS: u64 = 2_000;

// =============================================================================
// SUBMISSIONS
// =============================================================================

/// Submission bookkeeping values
pub mod submissions {
    /// Result stored on a submission the judge has not reported on yet
    pub const NO_RESULT: &str = "-";

    /// Executed time stored on a submission the judge has not reported on yet
    pub const UNJUDGED_EXECUTED_TIME: f64 = -1.0;
}

/// Language identifiers
pub mod languages {
    /// Maximum length of a language name (it doubles as a queue key)
    pub const MAX_NAME_LENGTH: usize = 32;
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: usize = 1024 * 1024;

/// Maximum test case input size in bytes (10 MB)
pub const MAX_TEST_CASE_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Maximum test case output size in bytes (10 MB)
pub const MAX_TEST_CASE_OUTPUT_SIZE: usize = 10 * 1024 * 1024;
