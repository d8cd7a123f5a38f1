//! Client fingerprint generation and hashing.
//!
//! The fingerprint recognizes a returning respondent. A random
//! identifier is generated on first run and persisted in the
//! configuration; only its SHA-256 hex digest ever leaves the client.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a fresh random fingerprint identifier (32 hex characters).
///
pub fn generate() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hex digest of a fingerprint identifier.
///
pub fn hash(fingerprint_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fingerprint_id.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_distinct_hex_identifiers() {
        let a = generate();
        let b = generate();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_matches_the_known_sha256_vector() {
        assert_eq!(
            hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_is_stable() {
        let id = generate();
        assert_eq!(hash(&id), hash(&id));
        assert_eq!(hash(&id).len(), 64);
    }
}
