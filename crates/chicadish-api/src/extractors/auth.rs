//! `AuthUser` extractor: reads the identity the authentication middleware attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chicadish_auth::identity::{AuthenticatedIdentity, Principal};
use chicadish_core::error::AppError;

use crate::error::ApiError;

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl AuthUser {
    /// Returns the inner identity.
    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(Principal::Authenticated(identity)) => Ok(AuthUser(identity.clone())),
            _ => Err(AppError::unauthorized("Authentication required").into()),
        }
    }
}
