//! Route definitions for the ChicaDish HTTP API.
//!
//! All routes are mounted under `/api`. Access is decided before routing by
//! the `authorize` middleware, so handlers only read the identity it let
//! through.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the auth middleware chain.
///
/// Request order: `authenticate` → `request_logging` → `authorize` → handler.
/// The chain wraps the fallback too, so unknown paths are still gated.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(client_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::authorize,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
        .with_state(state)
}

/// Auth endpoints: login, registration, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register/client", post(handlers::auth::register_client))
        .route("/auth/register/admin", post(handlers::auth::register_admin))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route("/admin/clients", get(handlers::admin::users::list_clients))
}

/// Client endpoints
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/client/dashboard", get(handlers::client::dashboard))
        .route("/client/profile", get(handlers::client::profile))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
