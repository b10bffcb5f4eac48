//! Short code generation and validation utilities.
//!
//! Generated codes are not cryptographically secure. Collisions are resolved by
//! the caller through the store's uniqueness constraint.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Length of auto-generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Bounds for user-supplied short codes.
pub const MIN_CUSTOM_CODE_LENGTH: usize = 4;
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Codes that collide with fixed routes.
const RESERVED_CODES: &[&str] = &["health", "links"];

/// Generates a random short code of exactly `length` characters.
///
/// Each position is drawn independently and uniformly from `A-Z`, `a-z`, `0-9`.
///
/// # Examples
///
/// ```
/// let code = link_tracker::utils::code_generator::generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-20 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let len = code.chars().count();
    if !(MIN_CUSTOM_CODE_LENGTH..=MAX_CUSTOM_CODE_LENGTH).contains(&len) {
        return Err(AppError::bad_request(
            "Short code must be between 4 and 20 characters",
            json!({ "field": "shortCode", "provided_length": len }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Short code must be alphanumeric",
            json!({ "field": "shortCode", "short_code": code }),
        ));
    }

    if RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(AppError::bad_request(
            "This short code is reserved",
            json!({ "field": "shortCode", "short_code": code }),
        ));
    }

    Ok(())
}
