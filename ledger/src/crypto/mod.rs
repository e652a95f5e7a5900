//! # Digest Primitives
//!
//! Thin wrappers around audited hash implementations:
//!
//! - **SHA-256** for block hashes. Every block hash is a lowercase hex
//!   SHA-256 digest.
//! - **BLAKE3** for catalog identifiers, truncated to a fixed width.
//!
//! No signing, no encryption. The chain is tamper-evident, not
//! tamper-proof.

pub mod hash;

pub use hash::{blake3_hash, blake3_hex_truncated, sha256, sha256_concat_hex};
