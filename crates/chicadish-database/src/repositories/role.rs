//! PostgreSQL role repository.

use async_trait::async_trait;
use sqlx::Row;

use chicadish_core::error::{AppError, ErrorKind};
use chicadish_core::result::AppResult;
use chicadish_core::types::RoleId;
use chicadish_entity::user::{Role, RoleRecord};

use super::RoleStore;
use crate::connection::DatabasePool;

/// Repository for the `roles` lookup table.
#[derive(Debug, Clone)]
pub struct PgRoleRepository {
    db: DatabasePool,
}

impl PgRoleRepository {
    /// Create a new role repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleStore for PgRoleRepository {
    async fn find_role_by_name(&self, name: Role) -> AppResult<Option<RoleRecord>> {
        let row = sqlx::query("SELECT id FROM roles WHERE name = $1")
            .bind(name.storage_name())
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))?;

        row.map(|row| {
            let id: RoleId = row
                .try_get("id")
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Malformed role row", e))?;
            Ok(RoleRecord { id, name })
        })
        .transpose()
    }

    async fn save_role(&self, name: Role) -> AppResult<RoleRecord> {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(RoleId::new())
            .bind(name.storage_name())
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save role", e))?;

        self.find_role_by_name(name)
            .await?
            .ok_or_else(|| AppError::database(format!("Role '{name}' vanished after insert")))
    }
}
