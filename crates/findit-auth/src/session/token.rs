//! Opaque refresh token generation and hashing.

use sha2::{Digest, Sha256};

/// Number of random bytes in a refresh token.
const TOKEN_BYTES: usize = 32;

/// Generates opaque refresh tokens and derives their storage digests.
///
/// Only the digest reaches the database, so a leaked `refresh_tokens`
/// table cannot be replayed against `/auth/refresh`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenGenerator;

impl RefreshTokenGenerator {
    /// A new random token, hex encoded.
    pub fn generate(&self) -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        hex::encode(bytes)
    }

    /// Hex SHA-256 digest of a token.
    pub fn hash(&self, token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}
