//! Typed path parameter helpers.

use chicadish_core::error::AppError;
use chicadish_core::types::UserId;

/// Parses a user ID from a path segment.
pub fn parse_user_id(s: &str) -> Result<UserId, AppError> {
    s.parse()
}
