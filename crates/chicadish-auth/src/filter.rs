//! Bearer-token request authentication.
//!
//! Runs once per request, before any access rule is evaluated. A missing,
//! malformed, expired, or forged token never fails the request here; the
//! caller simply stays anonymous and the access rules decide.

use tracing::{debug, warn};

use crate::identity::Principal;
use crate::jwt::JwtDecoder;

/// Scheme prefix expected on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the principal for a request from its `Authorization` header value.
pub fn authenticate(authorization: Option<&str>, decoder: &JwtDecoder) -> Principal {
    let Some(value) = authorization else {
        return Principal::Anonymous;
    };

    let Some(token) = value.strip_prefix(BEARER_PREFIX) else {
        debug!("Authorization header without bearer scheme ignored");
        return Principal::Anonymous;
    };

    match decoder.validate(token.trim()) {
        Ok(identity) => {
            debug!(user_id = %identity.user_id, "Request authenticated");
            Principal::Authenticated(identity)
        }
        Err(e) => {
            warn!(reason = e.label(), error = %e, "Bearer token rejected");
            Principal::Anonymous
        }
    }
}
