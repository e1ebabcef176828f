//! Input validation utilities

use crate::constants::{
    languages, MAX_PASSWORD_LENGTH, MAX_PROBLEM_TITLE_LENGTH, MAX_SOURCE_CODE_SIZE,
    MAX_TEST_CASE_INPUT_SIZE, MAX_TEST_CASE_OUTPUT_SIZE, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};
use crate::models::TestCaseFields;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count() as u64;
    if len < MIN_USERNAME_LENGTH {
        return Err("Username must be at least 3 characters");
    }
    if len > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Username can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count() as u64;
    if len < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err("Password must be at most 128 characters");
    }
    Ok(())
}

/// Validate a language name.
///
/// Any name is accepted as long as it can serve as a queue key; workers
/// decide which languages they serve. The name is never normalized.
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if language.is_empty() {
        return Err("Language cannot be empty");
    }
    if language.len() > languages::MAX_NAME_LENGTH {
        return Err("Language name is too long");
    }
    if language.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("Language name cannot contain whitespace");
    }
    Ok(())
}

/// Validate source code size
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() > MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size of 1MB");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate and sanitize problem title
pub fn validate_problem_title(title: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(title);
    if sanitized.is_empty() {
        return Err("Problem title cannot be empty");
    }
    if sanitized.chars().count() as u64 > MAX_PROBLEM_TITLE_LENGTH {
        return Err("Problem title must be at most 256 characters");
    }
    Ok(sanitized)
}

/// Validate the editable fields of a test case
pub fn validate_test_case(fields: &TestCaseFields) -> Result<(), &'static str> {
    if fields.input.len() > MAX_TEST_CASE_INPUT_SIZE {
        return Err("Test case input exceeds maximum size of 10MB");
    }
    if fields.expected_output.len() > MAX_TEST_CASE_OUTPUT_SIZE {
        return Err("Test case output exceeds maximum size of 10MB");
    }
    if fields.score < 0 {
        return Err("Test case score cannot be negative");
    }
    if !fields.timeout_seconds.is_finite() || fields.timeout_seconds <= 0.0 {
        return Err("Test case timeout must be a positive number of seconds");
    }
    Ok(())
}
