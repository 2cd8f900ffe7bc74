//! Argon2 password hashing for admin accounts.
//!
//! Hashes are stored as PHC strings, which embed the salt and the
//! parameters, so verifying needs nothing but the stored string.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

pub const HASHER_NAME: &str = "argon2";

pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| anyhow!("Failed to hash password: {}", err))?;
    Ok(hash.to_string())
}

/// `Ok(false)` for a wrong password, `Err` only when `stored_hash` cannot be
/// parsed.
#[cfg(test)]
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool> {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    let parsed =
        PasswordHash::new(stored_hash).map_err(|err| anyhow!("Malformed password hash: {}", err))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
