//! Current-user lookups.

use std::sync::Arc;

use chicadish_auth::identity::AuthenticatedIdentity;
use chicadish_core::error::AppError;
use chicadish_database::repositories::UserStore;
use chicadish_entity::user::User;

/// Resolves the caller's own account.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Loads the stored record behind an authenticated identity.
    ///
    /// A token that outlived its account is treated as unauthenticated.
    pub async fn current_user(&self, identity: &AuthenticatedIdentity) -> Result<User, AppError> {
        self.users
            .find_by_email(&identity.email)
            .await?
            .filter(|user| user.id == identity.user_id)
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }
}
