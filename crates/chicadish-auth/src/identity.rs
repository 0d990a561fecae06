//! Request-scoped caller identity.

use std::collections::BTreeSet;

use chicadish_core::types::UserId;
use chicadish_entity::user::{Role, User};

/// Who a valid bearer token says the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// The user the token was issued to.
    pub user_id: UserId,
    /// Email at the time of issuance.
    pub email: String,
    /// Roles at the time of issuance.
    pub roles: BTreeSet<Role>,
}

impl AuthenticatedIdentity {
    /// Builds the identity a freshly authenticated user will carry.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }

    /// True when the identity holds at least one of `allowed`.
    pub fn has_any_role(&self, allowed: &BTreeSet<Role>) -> bool {
        !self.roles.is_disjoint(allowed)
    }
}

/// The caller of a single request.
///
/// Lives for one request only; nothing about it is shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Principal {
    /// No usable credentials were presented.
    #[default]
    Anonymous,
    /// A valid token was presented.
    Authenticated(AuthenticatedIdentity),
}

impl Principal {
    /// Returns the identity when authenticated.
    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }
}
