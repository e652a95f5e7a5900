//! # Block Structure
//!
//! A block binds one transaction to its position in the chain and to the
//! hash of the block before it.
//!
//! ## Block Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Position:  u64        (genesis = 0)          │
//! │  TimeStamp: String     (RFC 3339, UTC, ns)    │
//! │  PrevHash:  String     (hex, "" for genesis)  │
//! │  Hash:      String     (hex SHA-256)          │
//! │  Data:      BookTransaction (embedded copy)   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! `SHA-256( decimal(Position) || json(Data) || PrevHash || TimeStamp )`,
//! lowercase hex. The position is rendered as decimal text, the
//! transaction as compact JSON in field declaration order. Every input is
//! stored in the block itself, so any holder of a block can recompute its
//! hash.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{GENESIS_POSITION, GENESIS_PREV_HASH};
use crate::crypto::hash::sha256_concat_hex;
use crate::transaction::BookTransaction;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// One sealed entry of the chain.
///
/// Blocks are fully built before they are returned. There is no way to
/// obtain a block whose `hash` has not been computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Zero-based position in the chain.
    pub position: u64,
    /// Wall-clock time at construction.
    #[serde(rename = "TimeStamp")]
    pub timestamp: String,
    /// Hash of the preceding block. Empty for genesis.
    pub prev_hash: String,
    /// Hash of this block's content.
    pub hash: String,
    /// The sealed transaction.
    pub data: BookTransaction,
}

impl Block {
    /// Construct the genesis block, stamped with the current time.
    ///
    /// Genesis is built by the same sealing routine as every other block,
    /// against a synthetic predecessor: position 0, empty previous hash,
    /// and the genesis-flagged transaction.
    pub fn genesis() -> Self {
        Self::genesis_at(now_timestamp())
    }

    /// Construct the genesis block with an explicit timestamp.
    pub fn genesis_at(timestamp: String) -> Self {
        Self::seal(
            GENESIS_POSITION,
            GENESIS_PREV_HASH.to_string(),
            BookTransaction::genesis(),
            timestamp,
        )
    }

    /// Construct the successor of `parent` carrying `data`.
    ///
    /// Reads the clock and nothing else. The chain is not touched.
    pub fn new(parent: &Block, data: BookTransaction) -> Self {
        Self::new_at(parent, data, now_timestamp())
    }

    /// Construct the successor of `parent` with an explicit timestamp.
    ///
    /// Pure: identical inputs always yield an identical block.
    pub fn new_at(parent: &Block, data: BookTransaction, timestamp: String) -> Self {
        Self::seal(parent.position + 1, parent.hash.clone(), data, timestamp)
    }

    fn seal(position: u64, prev_hash: String, data: BookTransaction, timestamp: String) -> Self {
        let hash = compute_block_hash(position, &data, &prev_hash, &timestamp);
        Block {
            position,
            timestamp,
            prev_hash,
            hash,
            data,
        }
    }

    /// Recompute the hash from the block's fields.
    pub fn compute_hash(&self) -> String {
        compute_block_hash(self.position, &self.data, &self.prev_hash, &self.timestamp)
    }

    /// Verify block integrity in isolation.
    ///
    /// Checks:
    ///
    /// 1. The stored hash matches the recomputed hash.
    /// 2. A block at position 0 has an empty previous hash and carries the
    ///    genesis transaction.
    ///
    /// Linkage to the predecessor is the chain's job, see
    /// [`Chain::verify`](super::chain::Chain::verify).
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string on the first mismatch.
    pub fn verify(&self) -> Result<(), String> {
        let expected = self.compute_hash();
        if self.hash != expected {
            return Err(format!(
                "block {} hash mismatch: stored={}, computed={}",
                self.position, self.hash, expected,
            ));
        }

        if self.is_genesis() {
            if self.prev_hash != GENESIS_PREV_HASH {
                return Err("genesis block must have an empty prev_hash".to_string());
            }
            if !self.data.is_genesis {
                return Err("genesis block must carry the genesis transaction".to_string());
            }
        }

        Ok(())
    }

    /// Whether this block sits at the genesis position.
    pub fn is_genesis(&self) -> bool {
        self.position == GENESIS_POSITION
    }
}

// ---------------------------------------------------------------------------
// Hash Computation
// ---------------------------------------------------------------------------

/// Compute a block hash from its constituent fields.
pub fn compute_block_hash(
    position: u64,
    data: &BookTransaction,
    prev_hash: &str,
    timestamp: &str,
) -> String {
    let position_text = position.to_string();
    let payload = data.canonical_bytes();
    sha256_concat_hex(&[
        position_text.as_bytes(),
        &payload,
        prev_hash.as_bytes(),
        timestamp.as_bytes(),
    ])
}

/// The current wall-clock time in the block timestamp format.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
