//! In-memory credential store backed by `dashmap`.
//!
//! Users are keyed by email so the uniqueness check and the insert happen
//! under one shard lock.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use chicadish_core::error::AppError;
use chicadish_core::result::AppResult;
use chicadish_core::types::UserId;
use chicadish_entity::user::{CreateUser, Role, RoleRecord, User};

use crate::repositories::{RoleStore, UserStore};

/// Process-local user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// Email → user record.
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone()))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.users.contains_key(email))
    }

    async fn save(&self, user: CreateUser) -> AppResult<User> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email is already in use")),
            Entry::Vacant(slot) => {
                let stored = user.into_user(UserId::new(), Utc::now());
                debug!(user_id = %stored.id, "Stored user in memory");
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.email.cmp(&b.email))
        });
        Ok(users)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Process-local role table.
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    roles: DashMap<Role, RoleRecord>,
}

impl MemoryRoleStore {
    /// Create an empty (unseeded) role table.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_role_by_name(&self, name: Role) -> AppResult<Option<RoleRecord>> {
        Ok(self.roles.get(&name).map(|entry| *entry.value()))
    }

    async fn save_role(&self, name: Role) -> AppResult<RoleRecord> {
        Ok(*self
            .roles
            .entry(name)
            .or_insert_with(|| RoleRecord::new(name))
            .value())
    }
}
