// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Bookchain: Core Library
//!
//! An append-only ledger for book purchases. Books are registered in a
//! catalog, and every purchase referencing a registered book is sealed into
//! a block that carries the hash of its predecessor. Tamper with any block
//! and every hash after it stops lining up.
//!
//! ## Architecture
//!
//! - **catalog**: Registered books and their content-derived identifiers.
//! - **transaction**: The purchase payload embedded in every block.
//! - **storage**: Block construction, hashing, and the in-memory chain.
//! - **service**: The [`Ledger`] service object: catalog + chain behind
//!   one lock, the only place mutations happen.
//! - **crypto**: Digest helpers (SHA-256, BLAKE3).
//! - **config**: Protocol constants.
//! - **error**: The error taxonomy shared by every operation.
//!
//! ## Design Philosophy
//!
//! 1. Blocks are built completely before anyone can see them. There is no
//!    draft state.
//! 2. One writer at a time. The chain's "read the tip, build the next block,
//!    push it" sequence runs under a single write lock.
//! 3. Nothing is ever mutated or deleted once committed.

pub mod catalog;
pub mod config;
pub mod crypto;
pub mod error;
pub mod service;
pub mod storage;
pub mod transaction;

pub use catalog::{Book, Catalog, NewBook};
pub use error::{LedgerError, Result};
pub use service::Ledger;
pub use storage::{Block, Chain};
pub use transaction::{BookTransaction, TransactionBuilder};
