//! JWT claims structure carried by bearer tokens.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chicadish_core::types::UserId;
use chicadish_entity::user::Role;

use crate::identity::AuthenticatedIdentity;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Email of the subject.
    pub email: String,
    /// Roles held at issuance.
    pub roles: BTreeSet<Role>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Builds claims for `identity`, valid from `issued_at` until `expires_at`.
    pub fn for_identity(
        identity: &AuthenticatedIdentity,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: identity.user_id,
            email: identity.email.clone(),
            roles: identity.roles.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Checks whether the token is expired at `now`, allowing `leeway_seconds` of skew.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        now.timestamp() >= self.exp.saturating_add(leeway_seconds)
    }

    /// Converts the claims into the identity they describe.
    pub fn into_identity(self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            user_id: self.sub,
            email: self.email,
            roles: self.roles,
        }
    }
}
