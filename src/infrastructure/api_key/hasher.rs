//! API key hashing
//!
//! Keys are never stored in clear text; the credential store is keyed by the
//! hex-encoded SHA-256 digest of the presented key.

use sha2::{Digest, Sha256};

/// Hash an API key for storage or lookup
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
