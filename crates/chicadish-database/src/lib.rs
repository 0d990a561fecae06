//! # chicadish-database
//!
//! Credential store for ChicaDish. Defines the [`UserStore`] and
//! [`RoleStore`] boundaries used by the core, with an in-memory provider
//! and a PostgreSQL provider selected by configuration.

pub mod connection;
pub mod memory;
pub mod provider;
pub mod repositories;
pub mod seed;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use repositories::{RoleStore, UserStore};
pub use seed::seed_roles;
