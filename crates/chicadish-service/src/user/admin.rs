//! Admin user listings and lookup.

use std::sync::Arc;

use tracing::debug;

use chicadish_core::error::AppError;
use chicadish_core::types::UserId;
use chicadish_database::repositories::UserStore;
use chicadish_entity::user::{Role, User};

/// Read-only user administration.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Lists every user, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.find_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Lists users holding the client role.
    pub async fn list_clients(&self) -> Result<Vec<User>, AppError> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .filter(|user| user.has_role(Role::Client))
            .collect())
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chicadish_core::error::ErrorKind;
    use chicadish_database::memory::MemoryUserStore;
    use chicadish_entity::user::CreateUser;

    use super::*;

    fn new_user(email: &str, role: Role) -> CreateUser {
        CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            roles: BTreeSet::from([role]),
            newsletter_subscribed: false,
        }
    }

    #[tokio::test]
    async fn test_listings_and_lookup() {
        let users = Arc::new(MemoryUserStore::new());
        let client = users.save(new_user("c@x.com", Role::Client)).await.unwrap();
        users.save(new_user("a@x.com", Role::Admin)).await.unwrap();
        let service = AdminUserService::new(users);

        assert_eq!(service.list_users().await.unwrap().len(), 2);

        let clients = service.list_clients().await.unwrap();
        assert_eq!(clients, vec![client.clone()]);

        assert_eq!(service.get_user(client.id).await.unwrap(), client);
        let err = service.get_user(UserId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
