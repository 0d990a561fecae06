//! Registration and login orchestration.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use chicadish_auth::identity::AuthenticatedIdentity;
use chicadish_auth::jwt::{IssuedToken, JwtEncoder};
use chicadish_auth::password::PasswordHasher;
use chicadish_core::error::AppError;
use chicadish_database::repositories::{RoleStore, UserStore};
use chicadish_entity::user::{CreateUser, Role, User};

/// Validated input for a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Newsletter opt-in.
    pub newsletter_subscribed: bool,
}

/// A freshly issued token together with the user it was issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The signed bearer token.
    pub token: IssuedToken,
    /// The authenticated user.
    pub user: User,
}

/// Handles account registration and credential login.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Role lookup table.
    roles: Arc<dyn RoleStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Whether anonymous callers may create admin accounts.
    allow_admin_registration: bool,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        allow_admin_registration: bool,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            encoder,
            allow_admin_registration,
        }
    }

    /// Registers a new account holding exactly `role`, then logs it in.
    pub async fn register(
        &self,
        command: RegisterCommand,
        role: Role,
    ) -> Result<AuthSession, AppError> {
        if role == Role::Admin && !self.allow_admin_registration {
            return Err(AppError::forbidden("Admin self-registration is disabled"));
        }

        if self.users.exists_by_email(&command.email).await? {
            info!(email = %command.email, "Registration rejected: email already in use");
            return Err(AppError::conflict("Email is already in use"));
        }

        if self.roles.find_role_by_name(role).await?.is_none() {
            error!(role = %role, "Role missing from the role table; seeding did not run");
            return Err(AppError::not_found(format!("Role '{role}' is not seeded")));
        }

        let password_hash = self.hasher.hash_password(&command.password)?;

        let user = self
            .users
            .save(CreateUser {
                first_name: command.first_name,
                last_name: command.last_name,
                email: command.email,
                password_hash,
                roles: BTreeSet::from([role]),
                newsletter_subscribed: command.newsletter_subscribed,
            })
            .await?;

        if role == Role::Admin {
            warn!(user_id = %user.id, email = %user.email, "Admin account self-registered");
        } else {
            info!(user_id = %user.id, role = %role, "User registered");
        }

        self.issue_session(user)
    }

    /// Authenticates by email and password.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.hasher.verify_dummy(password);
            info!(email = %email, "Login failed");
            return Err(invalid_credentials());
        };

        if !self.hasher.verify_password(password, &user.password_hash) {
            info!(email = %email, "Login failed");
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue_session(user)
    }

    fn issue_session(&self, user: User) -> Result<AuthSession, AppError> {
        let token = self
            .encoder
            .issue(&AuthenticatedIdentity::from_user(&user))?;
        Ok(AuthSession { token, user })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}
