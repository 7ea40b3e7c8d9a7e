//! Argon2 password hashing.
//!
//! Hashing and verification are CPU bound and run on tokio's blocking pool.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, Salt, SaltString},
    Argon2,
};
use rand::Rng;

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password into a PHC string with a random salt.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))?
}

/// Checks a password against a stored PHC string.
///
/// A stored value that is not a valid PHC string never matches.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let stored_hash = stored_hash.to_owned();

    let matches = tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
        .await
        .map_err(|e| InternalError::BlockingTask(e.to_string()))?;

    Ok(matches)
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; Salt::RECOMMENDED_LENGTH];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
