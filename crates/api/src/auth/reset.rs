//! Password-reset token generation and hashing.
//!
//! Reset tokens are opaque random strings; only their SHA-256 hash is stored
//! server-side so a database leak does not expose usable reset links. The
//! plaintext is handed to the delivery channel once and never persisted.

use sha2::{Digest, Sha256};

/// Generate a password-reset token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext
/// goes to the user; only the hash is persisted.
pub fn generate_reset_token() -> (String, String) {
    let plaintext = hotdesk_core::tokens::generate_token();
    let hash = hash_reset_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a reset token.
///
/// Use this to compare an incoming token against the stored hash.
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
