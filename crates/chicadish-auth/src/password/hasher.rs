//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use chicadish_core::config::AuthConfig;
use chicadish_core::error::AppError;

/// Plaintext hashed once at construction so unknown-email logins still pay
/// for a full verification.
const DUMMY_PASSWORD: &str = "chicadish-timing-equalizer";

/// Salted, one-way password hashing using Argon2id.
///
/// Every call to [`hash_password`](Self::hash_password) draws a fresh salt, so
/// two hashes of the same plaintext differ. Verification reads the cost
/// parameters embedded in the stored hash, which lets existing hashes keep
/// working after the configured costs change.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher from the configured memory, iteration, and lane costs.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.password_memory_kib,
            config.password_iterations,
            config.password_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        let dummy_hash = hash_with(&params, DUMMY_PASSWORD)?;
        Ok(Self { params, dummy_hash })
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        hash_with(&self.params, password)
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        argon2(self.params.clone())
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Runs a verification that always fails, taking as long as a real one.
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_hash);
    }
}

fn argon2(params: Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

fn hash_with(params: &Params, password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2(params.clone())
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}
