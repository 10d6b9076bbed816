//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so request handlers use the async variants,
//! which move the work onto tokio's blocking pool instead of stalling the
//! worker thread serving other requests.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes on the calling thread. Used by the CLI and tests.
pub fn hash_password_blocking(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| AppError::internal_error(format!("Password hashing task failed: {}", e)))?
}

pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed = hashed.to_owned();
    tokio::task::spawn_blocking(move || verify(&password, &hashed))
        .await
        .map_err(|e| AppError::internal_error(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
