//! Account password policy and Argon2id hashing.
//!
//! Length bounds are enforced on the way into the hasher, so no handler can
//! store a password that skipped them. Over-long login attempts are refused
//! before any hashing work is done.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use agora_core::error::CoreError;

use crate::error::AppError;

/// Shortest password accepted at sign-up, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest password accepted anywhere, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,

    #[error("Password must be at most {MAX_PASSWORD_LENGTH} characters long")]
    TooLong,

    /// The hasher failed, or a stored hash is not a valid PHC string.
    #[error("Password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort | PasswordError::TooLong => {
                AppError::Core(CoreError::Validation(err.to_string()))
            }
            PasswordError::Hash(_) => AppError::InternalError(err.to_string()),
        }
    }
}

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Check a sign-up password against the length policy.
pub fn check_policy(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

/// Hash a new account password into a PHC string, enforcing the policy first.
pub fn hash_new_password(password: &str) -> Result<String, PasswordError> {
    check_policy(password)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// Compare a login attempt with a stored PHC hash.
///
/// Attempts longer than any password we could have stored are a plain mismatch.
pub fn password_matches(attempt: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    if attempt.chars().count() > MAX_PASSWORD_LENGTH {
        return Ok(false);
    }
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::Hash)?;
    match hasher().verify_password(attempt.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}
