use anyhow::{Context as _, anyhow};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};

use crate::error::StoreServiceError;

/// Hash `password` with argon2id and a fresh random salt, as a PHC string.
///
/// Runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, StoreServiceError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .context("join password hashing task")?
}

fn hash_blocking(password: &str) -> Result<String, StoreServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. A malformed hash never
/// verifies.
#[cfg(test)]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
