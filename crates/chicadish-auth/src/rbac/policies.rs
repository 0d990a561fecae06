//! Path rule definitions.

use std::collections::BTreeSet;

use chicadish_core::config::FallbackPolicy;
use chicadish_entity::user::Role;

/// Suffix marking a pattern that covers a whole subtree.
const SUBTREE_SUFFIX: &str = "/**";

/// A request path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches one path exactly.
    Exact(String),
    /// Matches a path and everything beneath it.
    Subtree(String),
}

impl PathPattern {
    /// Parses `"/api/admin/**"` as a subtree and anything else as exact.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix(SUBTREE_SUFFIX) {
            Some(root) => Self::Subtree(normalize(root).to_string()),
            None => Self::Exact(normalize(pattern).to_string()),
        }
    }

    /// Checks whether `path` falls under this pattern.
    ///
    /// Segment boundaries are respected: `/api/admin/**` does not cover
    /// `/api/administrators`.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        match self {
            Self::Exact(exact) => path == exact,
            Self::Subtree(root) => {
                path == root
                    || path
                        .strip_prefix(root.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Drops a trailing slash, keeping `/` itself.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// What a rule requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, authenticated or not.
    Public,
    /// An authenticated caller holding at least one of these roles.
    RoleIn(BTreeSet<Role>),
}

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    /// Paths the rule covers.
    pub pattern: PathPattern,
    /// Requirement for those paths.
    pub access: Access,
}

impl AccessRule {
    /// A rule open to everyone.
    pub fn public(pattern: &str) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            access: Access::Public,
        }
    }

    /// A rule requiring one of `roles`.
    pub fn role_in(pattern: &str, roles: &[Role]) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            access: Access::RoleIn(roles.iter().copied().collect()),
        }
    }
}

/// Ordered rule table; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    rules: Vec<AccessRule>,
    fallback: FallbackPolicy,
}

impl RbacPolicies {
    /// The application's route table.
    ///
    /// `/api/auth/me` is listed ahead of the public `/api/auth/**` subtree so
    /// that it stays authenticated.
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self::with_rules(
            vec![
                AccessRule::role_in("/api/auth/me", &[Role::Client, Role::Admin]),
                AccessRule::public("/api/auth/**"),
                AccessRule::public("/api/health"),
                AccessRule::role_in("/api/admin/**", &[Role::Admin]),
                AccessRule::role_in("/api/client/**", &[Role::Client, Role::Admin]),
            ],
            fallback,
        )
    }

    /// Builds a table from explicit rules.
    pub fn with_rules(rules: Vec<AccessRule>, fallback: FallbackPolicy) -> Self {
        Self { rules, fallback }
    }

    /// Returns the first rule covering `path`.
    pub fn rule_for(&self, path: &str) -> Option<&AccessRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    /// Behaviour for paths no rule covers.
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}
