//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use chicadish_service::RegisterCommand;

/// Registration request body, shared by both registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Given name.
    #[validate(
        custom(function = "not_blank", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,
    /// Family name.
    #[validate(
        custom(function = "not_blank", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,
    /// Login email.
    #[validate(
        email(message = "Email must be a well-formed address"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,
    /// Plaintext password.
    #[validate(length(
        min = 6,
        max = 120,
        message = "Password must be between 6 and 120 characters"
    ))]
    pub password: String,
    /// Newsletter opt-in.
    #[serde(default = "default_newsletter")]
    pub newsletter_subscribed: bool,
}

fn default_newsletter() -> bool {
    true
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            newsletter_subscribed: req.newsletter_subscribed,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
