//! User entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chicadish_core::types::UserId;

use super::role::Role;

/// A registered user.
///
/// Emails are unique and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, assigned by the store on first save.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Granted roles; never empty after registration.
    pub roles: BTreeSet<Role>,
    /// Whether the user opted into the newsletter.
    pub newsletter_subscribed: bool,
    /// Reserved for account suspension; not checked at login.
    pub enabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether this user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The role set rendered for API responses.
    pub fn role_label(&self) -> String {
        Role::describe_set(&self.roles)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Roles to grant.
    pub roles: BTreeSet<Role>,
    /// Newsletter opt-in.
    pub newsletter_subscribed: bool,
}

impl CreateUser {
    /// Materialise the record with a freshly assigned id and timestamp.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            roles: self.roles,
            newsletter_subscribed: self.newsletter_subscribed,
            enabled: true,
            created_at,
        }
    }
}
