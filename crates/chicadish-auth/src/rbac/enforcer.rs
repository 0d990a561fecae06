//! Access enforcement: decides whether a principal may reach a path.

use tracing::debug;

use chicadish_core::config::FallbackPolicy;
use chicadish_core::error::AppError;
use chicadish_entity::user::Role;

use super::policies::{Access, RbacPolicies};
use crate::identity::Principal;

/// Evaluates request paths against the rule table.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates an enforcer over the application's route table.
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self::with_policies(RbacPolicies::new(fallback))
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether `principal` may access `path`.
    ///
    /// Anonymous callers are refused with `Unauthorized`; authenticated callers
    /// lacking a required role are refused with `Forbidden`.
    pub fn check(&self, path: &str, principal: &Principal) -> Result<(), AppError> {
        match self.policies.rule_for(path).map(|rule| &rule.access) {
            Some(Access::Public) => Ok(()),
            Some(Access::RoleIn(allowed)) => match principal {
                Principal::Anonymous => Err(AppError::unauthorized("Authentication required")),
                Principal::Authenticated(identity) if identity.has_any_role(allowed) => Ok(()),
                Principal::Authenticated(identity) => {
                    debug!(user_id = %identity.user_id, path, "Role requirement not met");
                    Err(AppError::forbidden(format!(
                        "Requires one of: {}",
                        Role::describe_set(allowed)
                    )))
                }
            },
            None => match (self.policies.fallback(), principal) {
                (FallbackPolicy::Permit, _) => Ok(()),
                (FallbackPolicy::Deny, Principal::Anonymous) => {
                    Err(AppError::unauthorized("Authentication required"))
                }
                (FallbackPolicy::Deny, Principal::Authenticated(_)) => {
                    Err(AppError::forbidden("No access rule covers this path"))
                }
            },
        }
    }
}
