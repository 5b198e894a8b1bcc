//! One-way password hashing for stored accounts.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`) with a fresh
//! random salt per call, so hashing the same password twice yields two
//! different strings that both verify.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::BackendError;

/// Hashes `plaintext` into a salted PHC string suitable for storage.
///
/// Empty input is accepted and produces a valid hash.
///
/// # Errors
///
/// Returns [`BackendError::Hashing`] if the Argon2 primitive rejects the
/// input or its parameters.
pub fn hash_password(plaintext: &str) -> Result<String, BackendError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::Hashing(e.to_string()))
}

/// Checks `plaintext` against a stored PHC hash.
///
/// Returns `false` for a mismatch and for a malformed stored hash alike.
/// The digest comparison inside Argon2 is constant-time.
#[must_use]
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
