//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chicadish_auth::jwt::{JwtDecoder, JwtEncoder};
use chicadish_auth::password::PasswordHasher;
use chicadish_auth::rbac::RbacEnforcer;
use chicadish_core::config::AppConfig;
use chicadish_core::error::AppError;
use chicadish_database::Stores;
use chicadish_service::{AdminUserService, AuthService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential stores
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Path-rule enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub auth_service: Arc<AuthService>,
    /// Current-user lookups
    pub user_service: Arc<UserService>,
    /// Admin listings
    pub admin_user_service: Arc<AdminUserService>,
}

impl AppState {
    /// Wires the auth primitives and services over already-opened stores.
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let password_hasher = Arc::new(PasswordHasher::from_config(&config.auth)?);
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(RbacEnforcer::new(config.auth.fallback_policy));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.roles),
            Arc::clone(&password_hasher),
            Arc::clone(&jwt_encoder),
            config.auth.allow_admin_registration,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let admin_user_service = Arc::new(AdminUserService::new(Arc::clone(&stores.users)));

        Ok(Self {
            config: Arc::new(config),
            stores,
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            rbac_enforcer,
            auth_service,
            user_service,
            admin_user_service,
        })
    }
}
