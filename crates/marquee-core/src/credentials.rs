//! Password hashing and verification for the single stored account.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Hash `password` into an argon2 PHC string suitable for the `password` key.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Check `password` against the stored value.
///
/// A stored value that parses as a PHC string is verified with argon2;
/// anything else is treated as a legacy plaintext password.
pub fn verify_password(password: &str, stored: &str) -> bool {
  match PasswordHash::new(stored) {
    Ok(parsed) => Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok(),
    Err(_) => password == stored,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hashed_password_verifies() {
    let hash = hash_password("secret").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("secret", &hash));
    assert!(!verify_password("wrong", &hash));
  }

  #[test]
  fn plaintext_password_compares_directly() {
    assert!(verify_password("hunter2", "hunter2"));
    assert!(!verify_password("hunter3", "hunter2"));
  }
}
