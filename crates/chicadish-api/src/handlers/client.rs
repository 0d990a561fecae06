//! Client area handlers.

use crate::extractors::AuthUser;

/// GET /api/client/dashboard
pub async fn dashboard(auth: AuthUser) -> String {
    format!("Welcome to Client Dashboard, {}!", auth.email)
}

/// GET /api/client/profile
pub async fn profile(auth: AuthUser) -> String {
    format!("Your Profile: {}", auth.email)
}
