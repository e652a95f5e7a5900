//! # Ledger Service
//!
//! The single owner of the catalog and the chain. Build one at startup,
//! wrap it in an `Arc`, and hand it to whatever serves requests.
//!
//! Both mutations take the write lock for their whole duration. For an
//! append that covers the reference check, reading the tip, building the
//! candidate, the integrity gate and the push, so two concurrent appends
//! can never build on the same tip. Reads take the read lock and return
//! owned snapshots; no lock guard ever escapes this module.

use parking_lot::RwLock;

use crate::catalog::{Book, Catalog, NewBook};
use crate::error::{LedgerError, Result};
use crate::storage::{Block, Chain};
use crate::transaction::BookTransaction;

#[derive(Debug)]
struct LedgerState {
    catalog: Catalog,
    chain: Chain,
}

/// Catalog + chain behind one lock.
#[derive(Debug)]
pub struct Ledger {
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Empty catalog, chain seeded with a fresh genesis block.
    pub fn new() -> Self {
        Self::from_chain(Chain::initialize())
    }

    /// Empty catalog around an existing chain.
    pub fn from_chain(chain: Chain) -> Self {
        let genesis_hash = chain.blocks()[0].hash.clone();
        tracing::info!(genesis = %genesis_hash, "ledger initialized");
        Self {
            state: RwLock::new(LedgerState {
                catalog: Catalog::new(),
                chain,
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Register a book and return the stored record, identifier included.
    pub fn register_book(&self, record: NewBook) -> Book {
        let book = self.state.write().catalog.insert(record).clone();
        tracing::info!(id = %book.id, name = %book.name, isbn = %book.isbn, "book registered");
        book
    }

    /// Decode a JSON body and register it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::MalformedInput`] if the body is not a book object.
    pub fn register_book_json(&self, body: &[u8]) -> Result<Book> {
        let record: NewBook = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "rejected book: unable to parse json");
            LedgerError::from(e)
        })?;
        Ok(self.register_book(record))
    }

    /// Append a transaction to the chain.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidReference`] for an unregistered book.
    /// - [`LedgerError::ChainIntegrity`] if the candidate fails the gate.
    ///
    /// On error the chain is unchanged.
    pub fn submit_transaction(&self, tx: BookTransaction) -> Result<Block> {
        let mut state = self.state.write();
        let LedgerState { catalog, chain } = &mut *state;

        match chain.append(catalog, tx) {
            Ok(block) => {
                tracing::info!(
                    position = block.position,
                    hash = %block.hash,
                    book_id = %block.data.book_id,
                    buyer = %block.data.buyer,
                    "block appended"
                );
                Ok(block)
            }
            Err(e) => {
                tracing::warn!(error = %e, height = chain.height(), "transaction rejected");
                Err(e)
            }
        }
    }

    /// Decode a JSON body and append it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::MalformedInput`] if the body is not a transaction
    /// object, otherwise as [`Ledger::submit_transaction`].
    pub fn submit_transaction_json(&self, body: &[u8]) -> Result<Block> {
        let tx: BookTransaction = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "rejected transaction: unable to parse json");
            LedgerError::from(e)
        })?;
        self.submit_transaction(tx)
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// All blocks, genesis first.
    pub fn blocks(&self) -> Vec<Block> {
        self.state.read().chain.blocks().to_vec()
    }

    /// All registered books, in registration order.
    pub fn books(&self) -> Vec<Book> {
        self.state.read().catalog.list().to_vec()
    }

    /// Block at `position`.
    pub fn block(&self, position: u64) -> Option<Block> {
        self.state.read().chain.get(position).cloned()
    }

    pub fn last_block(&self) -> Block {
        self.state.read().chain.last_block().clone()
    }

    /// Number of blocks, genesis included.
    pub fn height(&self) -> u64 {
        self.state.read().chain.height()
    }

    pub fn book_count(&self) -> usize {
        self.state.read().catalog.len()
    }

    pub fn book_exists(&self, id: &str) -> bool {
        self.state.read().catalog.exists(id)
    }

    /// Full-chain verification, see [`Chain::verify`].
    pub fn verify(&self) -> std::result::Result<(), Vec<String>> {
        self.state.read().chain.verify()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
