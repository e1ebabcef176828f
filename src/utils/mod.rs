//! Utility functions

pub mod validation;

pub use validation::{validate_language, validate_username};
