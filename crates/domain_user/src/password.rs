// Password hashing and verification

use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

/// Bcrypt cost factor for new password hashes
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Errors from password hashing or verification
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    Hashing(String),
}

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool since bcrypt is CPU-intensive.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - Optional bcrypt cost (defaults to [`BCRYPT_COST`])
///
/// # Errors
/// Returns `PasswordError::Hashing` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> Result<String, PasswordError> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hashing(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// # Returns
/// `Ok(true)` if the password matches, `Ok(false)` if not
///
/// # Errors
/// Returns `PasswordError::Hashing` if the hash is malformed
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, PasswordError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed).map_err(|e| PasswordError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hashing(format!("Task join error: {}", e)))?
}
