//! Precondition checks shared by the resources.

use crate::error::ApiError;

/// Return the value, or `MissingRequiredParameter` if it is absent or empty.
pub(crate) fn require<'v>(value: Option<&'v str>, field: &'static str) -> Result<&'v str, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingRequiredParameter { field }),
    }
}
