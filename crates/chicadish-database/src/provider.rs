//! Store provider that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use chicadish_core::config::DatabaseConfig;
use chicadish_core::error::AppError;
use chicadish_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryRoleStore, MemoryUserStore};
use crate::repositories::{PgRoleRepository, PgUserRepository, RoleStore, UserStore};

/// The pair of stores the application runs against.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User records.
    pub users: Arc<dyn UserStore>,
    /// Role lookup table.
    pub roles: Arc<dyn RoleStore>,
}

impl Stores {
    /// Open the stores named by `config.provider`, running migrations for PostgreSQL.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "memory" => {
                info!("Initializing in-memory credential store");
                Ok(Self::in_memory())
            }
            "postgres" => {
                info!("Initializing PostgreSQL credential store");
                let db = DatabasePool::connect(config).await?;
                db.migrate().await?;
                Ok(Self {
                    users: Arc::new(PgUserRepository::new(db.clone())),
                    roles: Arc::new(PgRoleRepository::new(db)),
                })
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            roles: Arc::new(MemoryRoleStore::new()),
        }
    }
}
