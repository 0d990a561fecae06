//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod client;
pub mod health;

use chicadish_core::error::AppError;

use crate::error::ApiError;

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    AppError::not_found("No such endpoint").into()
}
