//! Credential store boundary and its PostgreSQL implementations.
//!
//! The core only talks to the [`UserStore`] and [`RoleStore`] traits. Every
//! call may block on I/O, so all of them are async; nothing above this layer
//! caches user records.

pub mod role;
pub mod user;

use async_trait::async_trait;

use chicadish_core::result::AppResult;
use chicadish_core::types::UserId;
use chicadish_entity::user::{CreateUser, Role, RoleRecord, User};

pub use role::PgRoleRepository;
pub use user::PgUserRepository;

/// Persistent user records.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by identifier.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Whether a user with this exact email exists.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Persist a new user, assigning its identifier.
    ///
    /// Email uniqueness is enforced atomically here: a concurrent duplicate
    /// fails with `ErrorKind::Conflict` even if an earlier existence check passed.
    async fn save(&self, user: CreateUser) -> AppResult<User>;

    /// All users, oldest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Cheap liveness probe for health reporting.
    async fn ping(&self) -> AppResult<()>;
}

/// The seeded role lookup table.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the row for a role name.
    async fn find_role_by_name(&self, name: Role) -> AppResult<Option<RoleRecord>>;

    /// Insert the row for a role if absent and return the stored row.
    async fn save_role(&self, name: Role) -> AppResult<RoleRecord>;
}
