//! Field validation for issue records.
//!
//! Limits are enforced strictly at the store boundary: oversized input is
//! rejected, never truncated. Lengths are counted in Unicode scalar values,
//! so a multi-byte name of 255 characters is valid.

use crate::error::{IssueDbError, Result};

/// Maximum length of an issue name.
pub const MAX_NAME_LEN: usize = 255;
/// Maximum length of an issue detail body.
pub const MAX_DETAIL_LEN: usize = 2000;
/// Maximum length of a creator identifier.
pub const MAX_USER_ID_LEN: usize = 63;

/// Validate an issue name: required and at most [`MAX_NAME_LEN`] characters.
///
/// # Errors
///
/// Returns a validation error naming the field when the name is empty or too
/// long.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IssueDbError::validation("name", "must not be empty"));
    }
    check_max_len("name", name, MAX_NAME_LEN)
}

/// Validate an issue detail body: at most [`MAX_DETAIL_LEN`] characters.
/// An empty detail is valid.
///
/// # Errors
///
/// Returns a validation error when the detail is too long.
pub fn validate_detail(detail: &str) -> Result<()> {
    check_max_len("detail", detail, MAX_DETAIL_LEN)
}

/// Validate a creator identifier: at most [`MAX_USER_ID_LEN`] characters.
/// The value is opaque; nothing beyond its length is checked.
///
/// # Errors
///
/// Returns a validation error when the identifier is too long.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    check_max_len("user_id", user_id, MAX_USER_ID_LEN)
}

fn check_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(IssueDbError::validation(
            field,
            format!("length {len} exceeds maximum of {max} characters"),
        ));
    }
    Ok(())
}
