//! Token validation failures.

use thiserror::Error;

/// Why a bearer token was rejected.
///
/// The request filter only logs these; the caller then proceeds anonymously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signature does not match the configured secret.
    #[error("invalid token signature")]
    SignatureInvalid,
    /// The token was well formed and correctly signed but has expired.
    #[error("token has expired")]
    Expired,
    /// The token could not be parsed or is missing required claims.
    #[error("malformed token: {0}")]
    Malformed(String),
}

impl TokenError {
    /// Short label for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired => "expired",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed(err.to_string()),
        }
    }
}
