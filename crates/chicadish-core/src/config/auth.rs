//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in the defaults. Startup warns when it is in use.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_TTL_HOURS: u64 = 24 * 366;

/// What the access policy does with a path that matches no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Unmatched paths are allowed for everyone.
    Permit,
    /// Unmatched paths are rejected: 401 when anonymous, 403 otherwise.
    Deny,
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in hours.
    #[serde(default = "default_ttl_hours")]
    pub jwt_ttl_hours: u64,
    /// Clock-skew allowance applied to the expiry check, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub password_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_iterations")]
    pub password_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub password_parallelism: u32,
    /// Whether `POST /api/auth/register/admin` is open to anonymous callers.
    #[serde(default = "default_true")]
    pub allow_admin_registration: bool,
    /// Behaviour for paths not covered by any access rule.
    #[serde(default = "default_fallback")]
    pub fallback_policy: FallbackPolicy,
}

impl AuthConfig {
    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if !(1..=MAX_JWT_TTL_HOURS).contains(&self.jwt_ttl_hours) {
            return Err(AppError::configuration(format!(
                "auth.jwt_ttl_hours must be between 1 and {MAX_JWT_TTL_HOURS}, got {}",
                self.jwt_ttl_hours
            )));
        }
        Ok(())
    }

    /// Whether the shipped placeholder secret is still configured.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_hours: default_ttl_hours(),
            jwt_leeway_seconds: 0,
            password_memory_kib: default_memory_kib(),
            password_iterations: default_iterations(),
            password_parallelism: default_parallelism(),
            allow_admin_registration: default_true(),
            fallback_policy: default_fallback(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_fallback() -> FallbackPolicy {
    FallbackPolicy::Deny
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_placeholder_secret());
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.fallback_policy, FallbackPolicy::Deny);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: String::new(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_bounds() {
        let with_ttl = |jwt_ttl_hours| AuthConfig {
            jwt_ttl_hours,
            ..AuthConfig::default()
        };
        assert!(with_ttl(0).validate().is_err());
        assert!(with_ttl(1).validate().is_ok());
        assert!(with_ttl(MAX_JWT_TTL_HOURS).validate().is_ok());
        assert!(with_ttl(MAX_JWT_TTL_HOURS + 1).validate().is_err());

        let err = with_ttl(u64::MAX).validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_fallback_policy_deserializes_lowercase() {
        let policy: FallbackPolicy = serde_json::from_str("\"permit\"").expect("parse");
        assert_eq!(policy, FallbackPolicy::Permit);
    }
}
