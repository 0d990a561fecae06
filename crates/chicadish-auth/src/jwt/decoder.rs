//! JWT token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use chicadish_core::config::AuthConfig;

use super::claims::Claims;
use super::error::TokenError;
use crate::identity::AuthenticatedIdentity;

/// Validates bearer tokens signed by [`JwtEncoder`](super::JwtEncoder).
///
/// Expiry is checked here rather than by `jsonwebtoken` so the clock can be
/// supplied by the caller.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature and claim-presence checks.
    validation: Validation,
    /// Clock-skew allowance in seconds.
    leeway_seconds: i64,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            leeway_seconds: i64::try_from(config.jwt_leeway_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Validates `token` against the current time.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates `token` as if the current time were `now`.
    ///
    /// Signature problems are reported before expiry, so a forged token is
    /// never reported as merely expired.
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired_at(now, self.leeway_seconds) {
            return Err(TokenError::Expired);
        }

        Ok(claims.into_identity())
    }
}
