//! In-memory chain management with validation.
//!
//! The [`Chain`] is never empty: it is born holding its genesis block and
//! only ever grows by one validated block at a time.

use super::block::Block;
use crate::catalog::Catalog;
use crate::error::{LedgerError, Result};
use crate::transaction::BookTransaction;

/// Ordered chain of sealed blocks. Index 0 is always genesis.
#[derive(Debug, Clone)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain holding only a freshly stamped genesis block.
    pub fn initialize() -> Self {
        Self::from_genesis(Block::genesis())
    }

    /// Create a chain seeded with a caller-supplied genesis block.
    pub fn from_genesis(genesis: Block) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    /// The block at the highest position.
    pub fn last_block(&self) -> &Block {
        // Never empty: construction always seeds genesis and nothing removes blocks.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Append a transaction, stamping the new block with the current time.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidReference`] if `tx.book_id` is not in `catalog`.
    /// - [`LedgerError::ChainIntegrity`] if the candidate does not link to
    ///   the current tip. The candidate is dropped.
    pub fn append(&mut self, catalog: &Catalog, tx: BookTransaction) -> Result<Block> {
        self.append_with(catalog, tx, Block::new)
    }

    /// Append a transaction with an explicit timestamp.
    pub fn append_at(
        &mut self,
        catalog: &Catalog,
        tx: BookTransaction,
        timestamp: String,
    ) -> Result<Block> {
        self.append_with(catalog, tx, |prev, tx| Block::new_at(prev, tx, timestamp))
    }

    fn append_with<F>(
        &mut self,
        catalog: &Catalog,
        tx: BookTransaction,
        construct: F,
    ) -> Result<Block>
    where
        F: FnOnce(&Block, BookTransaction) -> Block,
    {
        if !catalog.exists(&tx.book_id) {
            return Err(LedgerError::InvalidReference(tx.book_id));
        }

        let candidate = construct(self.last_block(), tx);
        self.link(candidate)
    }

    /// Integrity gate: the only way a block enters the chain.
    pub(crate) fn link(&mut self, candidate: Block) -> Result<Block> {
        let prev = self.last_block();
        if candidate.prev_hash != prev.hash || candidate.position != prev.position + 1 {
            tracing::error!(
                position = candidate.position,
                expected = %prev.hash,
                got = %candidate.prev_hash,
                "candidate block does not link to chain tip"
            );
            return Err(LedgerError::ChainIntegrity {
                position: candidate.position,
                expected: prev.hash.clone(),
                got: candidate.prev_hash,
            });
        }

        self.blocks.push(candidate.clone());
        Ok(candidate)
    }

    /// Walk the whole chain and collect every integrity violation.
    ///
    /// Checks each block in isolation ([`Block::verify`]) and every adjacent
    /// pair for hash linkage and consecutive positions. An untouched chain
    /// always verifies.
    ///
    /// # Errors
    ///
    /// Returns all violations found, in chain order.
    pub fn verify(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(genesis) = self.blocks.first() {
            if !genesis.is_genesis() {
                errors.push(format!(
                    "first block has position {}, expected 0",
                    genesis.position
                ));
            }
        }

        for (i, block) in self.blocks.iter().enumerate() {
            if let Err(e) = block.verify() {
                errors.push(e);
            }
            if i == 0 {
                continue;
            }
            let prev = &self.blocks[i - 1];
            if block.prev_hash != prev.hash {
                errors.push(format!("block {} prev_hash mismatch", block.position));
            }
            if block.position != prev.position + 1 {
                errors.push(format!(
                    "block at index {} has position {}, expected {}",
                    i,
                    block.position,
                    prev.position + 1
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Block at `position`, if the chain is that long.
    pub fn get(&self, position: u64) -> Option<&Block> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.blocks.get(i))
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, genesis included.
    pub fn height(&self) -> u64 {
        self.blocks.len() as u64
    }

    /// Mutable access for tamper tests only.
    #[cfg(test)]
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewBook;
    use crate::transaction::TransactionBuilder;

    fn catalog_with_dune() -> (Catalog, String) {
        let mut catalog = Catalog::new();
        let id = catalog.register(NewBook::new("Dune", "Frank Herbert", "123", "1965"));
        (catalog, id)
    }

    fn purchase(id: &str, buyer: &str) -> BookTransaction {
        TransactionBuilder::new(id)
            .buyer(buyer)
            .purchase_date("2024-01-01")
            .build()
    }

    #[test]
    fn initialize_yields_single_genesis() {
        let chain = Chain::initialize();
        assert_eq!(chain.height(), 1);
        let genesis = chain.last_block();
        assert_eq!(genesis.position, 0);
        assert!(genesis.data.is_genesis);
    }

    #[test]
    fn append_links_blocks() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();

        for buyer in ["alice", "bob", "carol"] {
            chain.append(&catalog, purchase(&id, buyer)).unwrap();
        }

        assert_eq!(chain.height(), 4);
        for pair in chain.blocks().windows(2) {
            assert_eq!(pair[1].prev_hash, pair[0].hash);
            assert_eq!(pair[1].position, pair[0].position + 1);
        }
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn append_returns_the_committed_block() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();
        let block = chain.append(&catalog, purchase(&id, "alice")).unwrap();
        assert_eq!(&block, chain.last_block());
    }

    #[test]
    fn unknown_reference_is_rejected_without_growth() {
        let (catalog, _) = catalog_with_dune();
        let mut chain = Chain::initialize();

        let err = chain.append(&catalog, purchase("nope", "alice")).unwrap_err();
        assert_eq!(err, LedgerError::InvalidReference("nope".into()));
        assert_eq!(chain.height(), 1);
    }

    #[test]
    fn genesis_flag_does_not_bypass_reference_check() {
        let (catalog, _) = catalog_with_dune();
        let mut chain = Chain::initialize();
        let err = chain.append(&catalog, BookTransaction::genesis()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidReference(_)));
    }

    #[test]
    fn append_at_is_reproducible() {
        let (catalog, id) = catalog_with_dune();
        let ts = "2024-01-01T00:00:00.000000000Z".to_string();
        let genesis = Block::genesis_at(ts.clone());

        let mut a = Chain::from_genesis(genesis.clone());
        let mut b = Chain::from_genesis(genesis);
        let block_a = a.append_at(&catalog, purchase(&id, "alice"), ts.clone()).unwrap();
        let block_b = b.append_at(&catalog, purchase(&id, "alice"), ts).unwrap();
        assert_eq!(block_a.hash, block_b.hash);
    }

    #[test]
    fn link_rejects_candidate_with_wrong_prev_hash() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();
        chain.append(&catalog, purchase(&id, "alice")).unwrap();

        // Built against genesis, not against the current tip.
        let stale = Block::new(&chain.blocks()[0], purchase(&id, "bob"));
        let err = chain.link(stale).unwrap_err();
        assert!(matches!(err, LedgerError::ChainIntegrity { position: 1, .. }));
        assert_eq!(chain.height(), 2);
    }

    #[test]
    fn get_by_position() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();
        chain.append(&catalog, purchase(&id, "alice")).unwrap();

        assert_eq!(chain.get(0).unwrap().position, 0);
        assert_eq!(chain.get(1).unwrap().data.buyer, "alice");
        assert!(chain.get(2).is_none());
        assert!(chain.get(u64::MAX).is_none());
    }

    #[test]
    fn verify_detects_tampered_payload() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();
        chain.append(&catalog, purchase(&id, "alice")).unwrap();
        chain.append(&catalog, purchase(&id, "bob")).unwrap();

        chain.blocks_mut()[1].data.buyer = "mallory".into();

        let errors = chain.verify().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("block 1 hash mismatch"));
    }

    #[test]
    fn verify_detects_rehashed_block_via_linkage() {
        let (catalog, id) = catalog_with_dune();
        let mut chain = Chain::initialize();
        chain.append(&catalog, purchase(&id, "alice")).unwrap();
        chain.append(&catalog, purchase(&id, "bob")).unwrap();

        // A forger who also recomputes the hash still breaks the next link.
        let forged = &mut chain.blocks_mut()[1];
        forged.data.buyer = "mallory".into();
        forged.hash = forged.compute_hash();

        let errors = chain.verify().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("block 2 prev_hash mismatch")));
    }
}
