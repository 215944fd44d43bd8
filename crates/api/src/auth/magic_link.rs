//! Magic-link (passwordless sign-in) token helpers.
//!
//! Tokens are opaque random strings; only their SHA-256 hex digest is
//! stored so a database leak does not compromise pending sign-in links.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Validity window for a magic-link token, in hours.
pub const TOKEN_VALID_HOURS: i64 = 24;

/// Generate a magic-link token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes into
/// the emailed link; only the hash is persisted.
pub fn generate_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a token, for storage and lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_hex() {
        let (plaintext, hash) = generate_token();
        assert_eq!(hash, hash_token(&plaintext));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = generate_token();
        let (b, _) = generate_token();
        assert_ne!(a, b);
    }
}
