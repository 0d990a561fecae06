//! Role-gated access rules.
//!
//! - `policies` — the ordered path-rule table
//! - `enforcer` — evaluates a request path against that table

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{Access, AccessRule, PathPattern, RbacPolicies};
