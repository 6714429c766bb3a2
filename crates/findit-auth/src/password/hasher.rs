//! Argon2id hashing for stored passwords.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};

use findit_core::error::AppError;

/// Produces and checks PHC-format Argon2id hashes (`$argon2id$...`).
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        use argon2::password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Cannot hash password: {e}")))?;
        Ok(phc.to_string())
    }

    /// `Ok(false)` on a wrong password. Errors mean the stored hash is unusable.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("Stored password hash is corrupt: {e}")))?;

        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Cannot verify password: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let hasher = PasswordHasher::new();
        let stored = hasher.hash("secret123").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("secret123", &stored).unwrap());
        assert!(!hasher.verify("secret124", &stored).unwrap());
    }

    #[test]
    fn test_each_hash_is_salted() {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_error() {
        assert!(PasswordHasher::new().verify("x", "plaintext").is_err());
    }
}
