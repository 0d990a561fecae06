//! Startup seeding of the role table.

use tracing::info;

use chicadish_core::result::AppResult;
use chicadish_entity::user::{Role, RoleRecord};

use crate::repositories::RoleStore;

/// Ensure a row exists for every [`Role`]. Safe to call on every boot.
pub async fn seed_roles(roles: &dyn RoleStore) -> AppResult<Vec<RoleRecord>> {
    let mut seeded = Vec::with_capacity(Role::ALL.len());

    for role in Role::ALL {
        let record = match roles.find_role_by_name(role).await? {
            Some(existing) => existing,
            None => {
                let created = roles.save_role(role).await?;
                info!(role = %role, role_id = %created.id, "Seeded role");
                created
            }
        };
        seeded.push(record);
    }

    Ok(seeded)
}
