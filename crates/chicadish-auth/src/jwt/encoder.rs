//! JWT token creation with configurable TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use chicadish_core::config::AuthConfig;
use chicadish_core::error::AppError;

use super::claims::Claims;
use crate::identity::AuthenticatedIdentity;

/// Creates HS256-signed bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Lifetime of every issued token.
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// A signed token and when it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails on a secret or TTL that [`AuthConfig::validate`] rejects, so a
    /// constructed encoder never fails on configuration when issuing.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;
        let ttl = i64::try_from(config.jwt_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| AppError::configuration("auth.jwt_ttl_hours is out of range"))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl,
        })
    }

    /// Issues a token for `identity`, valid from now.
    pub fn issue(&self, identity: &AuthenticatedIdentity) -> Result<IssuedToken, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token for `identity` as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &AuthenticatedIdentity,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal(format!("Token expiry overflows from {now}")))?;

        let claims = Claims::for_identity(identity, now, expires_at);
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
