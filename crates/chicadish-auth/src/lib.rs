//! # chicadish-auth
//!
//! Authentication and authorization core for ChicaDish.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — bearer token issuance and validation
//! - `identity` — the request-scoped authenticated identity
//! - `filter` — turns an `Authorization` header into a [`Principal`]
//! - `rbac` — ordered path rules and their enforcement

pub mod filter;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use filter::authenticate;
pub use identity::{AuthenticatedIdentity, Principal};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::PasswordHasher;
pub use rbac::{Access, AccessRule, PathPattern, RbacEnforcer, RbacPolicies};
