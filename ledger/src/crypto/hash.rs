//! # Hashing Utilities
//!
//! Two hash functions, two jobs:
//!
//! - **SHA-256** seals blocks. [`sha256_concat_hex`] feeds a list of byte
//!   slices through one hasher, so callers never build an intermediate
//!   buffer for the block preimage.
//! - **BLAKE3** derives catalog identifiers. It is fast and its output is
//!   truncated, so identifiers are fingerprints, not security boundaries.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use bookchain_ledger::crypto::sha256;
///
/// let hash = sha256(b"bookchain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash the concatenation of `parts` with SHA-256 and return lowercase hex.
///
/// Equivalent to `hex::encode(sha256(&parts.concat()))`, without the
/// concatenation.
pub fn sha256_concat_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// Compute the BLAKE3 hash of the input data.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// BLAKE3 digest truncated to the first `bytes` bytes, hex-encoded.
///
/// `bytes` is clamped to the digest length (32).
pub fn blake3_hex_truncated(data: &[u8], bytes: usize) -> String {
    let digest = blake3_hash(data);
    hex::encode(&digest[..bytes.min(digest.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vectors() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn concat_matches_single_shot() {
        let joined = sha256_concat_hex(&[b"a", b"b", b"c"]);
        assert_eq!(joined, hex::encode(sha256(b"abc")));
    }

    #[test]
    fn concat_of_nothing_is_empty_digest() {
        assert_eq!(sha256_concat_hex(&[]), hex::encode(sha256(b"")));
    }

    #[test]
    fn blake3_known_vector() {
        assert_eq!(
            hex::encode(blake3_hash(b"")),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn blake3_truncation_is_a_prefix() {
        let full = hex::encode(blake3_hash(b"Dune,123"));
        let short = blake3_hex_truncated(b"Dune,123", 16);
        assert_eq!(short.len(), 32);
        assert!(full.starts_with(&short));
    }

    #[test]
    fn blake3_truncation_clamps() {
        assert_eq!(blake3_hex_truncated(b"x", 100).len(), 64);
    }
}
