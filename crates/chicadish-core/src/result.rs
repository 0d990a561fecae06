//! Convenience result type alias for ChicaDish.

use crate::error::AppError;

/// A specialized `Result` type for ChicaDish operations.
pub type AppResult<T> = Result<T, AppError>;
