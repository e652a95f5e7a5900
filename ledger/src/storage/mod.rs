//! # Storage Module
//!
//! The chain itself. Everything lives in memory; a restart begins a new
//! chain from a new genesis block.
//!
//! ## Architecture
//!
//! ```text
//! block.rs : Block structure, genesis block, hash/verify operations
//! chain.rs : In-memory chain management with validation
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! BookTransaction → Block::new(tip, tx) → Chain::link → blocks[n]
//!                        ↑                     ↓
//!                   Catalog::exists      prev_hash == tip.hash?
//! ```

pub mod block;
pub mod chain;

pub use block::{compute_block_hash, now_timestamp, Block};
pub use chain::Chain;
