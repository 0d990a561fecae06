//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chicadish_core::types::UserId;
use chicadish_entity::user::User;
use chicadish_service::AuthSession;

/// Token scheme reported alongside issued tokens.
pub const TOKEN_TYPE: &str = "Bearer";

/// Login, registration, and current-user response.
///
/// `token` and `type` are null when no token was issued (`GET /api/auth/me`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token.
    pub token: Option<String>,
    /// Token scheme.
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role names joined with `", "`.
    pub role: String,
    /// Newsletter opt-in.
    pub newsletter_subscribed: bool,
}

impl AuthResponse {
    /// Describes `user` without a token.
    pub fn identity_only(user: &User) -> Self {
        Self {
            token: None,
            token_type: None,
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role_label(),
            newsletter_subscribed: user.newsletter_subscribed,
        }
    }
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: Some(session.token.token),
            token_type: Some(TOKEN_TYPE.to_string()),
            ..Self::identity_only(&session.user)
        }
    }
}

/// User summary for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User ID.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Role names joined with `", "`.
    pub role: String,
    /// Newsletter opt-in.
    pub newsletter_subscribed: bool,
    /// Account enabled flag.
    pub enabled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let role = user.role_label();
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role,
            newsletter_subscribed: user.newsletter_subscribed,
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Credential store status: `connected` or `unavailable`.
    pub database: String,
}
