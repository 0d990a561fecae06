//! # chicadish-service
//!
//! Business logic service layer for ChicaDish. Each service orchestrates the
//! credential stores and the auth primitives to implement one group of use
//! cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod auth;
pub mod user;

pub use auth::{AuthService, AuthSession, RegisterCommand};
pub use user::{AdminUserService, UserService};
