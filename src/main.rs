//! ChicaDish Server: user registration, bearer-token login, and role-gated endpoints.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use chicadish_api::{AppState, run_server};
use chicadish_core::config::AppConfig;
use chicadish_core::error::AppError;
use chicadish_database::{Stores, seed_roles};

#[tokio::main]
async fn main() {
    let env = std::env::var("CHICADISH_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    if config.auth.uses_placeholder_secret() {
        tracing::warn!("auth.jwt_secret is the shipped placeholder; set CHICADISH__AUTH__JWT_SECRET");
    }
    if config.auth.allow_admin_registration {
        tracing::warn!("Anonymous admin registration is enabled (auth.allow_admin_registration)");
    }
    tracing::info!(fallback = ?config.auth.fallback_policy, "Access rule fallback policy");

    let stores = Stores::open(&config.database).await?;
    seed_roles(stores.roles.as_ref()).await?;

    let state = AppState::new(config, stores)?;
    run_server(state).await
}
