//! End-to-end integration tests for the ledger.
//!
//! These drive the public API the way the HTTP node does: register books,
//! submit purchases, read the chain back, and check that every invariant
//! of a hash-linked chain still holds afterwards.
//!
//! Each test builds its own `Ledger`. No shared state.

use std::sync::Arc;

use bookchain_ledger::catalog::book_id;
use bookchain_ledger::storage::{compute_block_hash, Block, Chain};
use bookchain_ledger::{BookTransaction, Ledger, LedgerError, NewBook, TransactionBuilder};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn dune() -> NewBook {
    NewBook::new("Dune", "Frank Herbert", "123", "1965-08-01")
}

fn purchase(id: &str, buyer: &str) -> BookTransaction {
    TransactionBuilder::new(id)
        .buyer(buyer)
        .purchase_date("2024-01-01")
        .build()
}

fn assert_linked(blocks: &[Block]) {
    assert!(!blocks.is_empty());
    assert_eq!(blocks[0].position, 0);
    for pair in blocks.windows(2) {
        assert_eq!(pair[1].prev_hash, pair[0].hash);
        assert_eq!(pair[1].position, pair[0].position + 1);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn register_purchase_and_reject_unknown() {
    let ledger = Ledger::new();

    let h = ledger.register_book(NewBook::new("Dune", "", "123", "")).id;
    assert_eq!(h, book_id("Dune", "123"));

    ledger.submit_transaction(purchase(&h, "alice")).unwrap();
    assert_eq!(ledger.height(), 2);

    let blocks = ledger.blocks();
    assert_eq!(blocks[1].prev_hash, blocks[0].hash);
    assert_eq!(blocks[1].data.buyer, "alice");

    let err = ledger.submit_transaction(purchase("nope", "bob")).unwrap_err();
    assert_eq!(err, LedgerError::InvalidReference("nope".into()));
    assert_eq!(ledger.height(), 2);
}

#[test]
fn purchase_before_registration_is_rejected() {
    let ledger = Ledger::new();
    let future_id = book_id("Dune", "123");

    let err = ledger
        .submit_transaction(purchase(&future_id, "alice"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidReference(_)));
    assert_eq!(ledger.height(), 1);

    // Registering afterwards makes the very same transaction acceptable.
    ledger.register_book(dune());
    ledger
        .submit_transaction(purchase(&future_id, "alice"))
        .unwrap();
    assert_eq!(ledger.height(), 2);
}

#[test]
fn genesis_invariant() {
    let ledger = Ledger::new();
    let blocks = ledger.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].position, 0);
    assert!(blocks[0].data.is_genesis);
    assert!(blocks[0].prev_hash.is_empty());
}

#[test]
fn identifiers_are_content_derived() {
    let ledger = Ledger::new();
    let first = ledger.register_book(dune()).id;
    let second = ledger.register_book(dune()).id;
    assert_eq!(first, second);
    assert_eq!(ledger.book_count(), 2);
}

#[test]
fn long_chain_stays_linked_and_verifiable() {
    let ledger = Ledger::new();
    let dune = ledger.register_book(dune()).id;
    let emma = ledger
        .register_book(NewBook::new("Emma", "Jane Austen", "456", "1815-12-23"))
        .id;

    for i in 0..50 {
        let id = if i % 2 == 0 { &dune } else { &emma };
        ledger
            .submit_transaction(purchase(id, &format!("buyer-{}", i)))
            .unwrap();
    }

    let blocks = ledger.blocks();
    assert_eq!(blocks.len(), 51);
    assert_linked(&blocks);
    for block in &blocks {
        assert_eq!(
            block.hash,
            compute_block_hash(block.position, &block.data, &block.prev_hash, &block.timestamp)
        );
    }
    assert!(ledger.verify().is_ok());
}

#[test]
fn construction_is_deterministic_given_timestamp() {
    let ts = "2024-01-01T12:00:00.000000000Z".to_string();
    let genesis = Block::genesis_at(ts.clone());
    let tx = purchase(&book_id("Dune", "123"), "alice");

    let a = Block::new_at(&genesis, tx.clone(), ts.clone());
    let b = Block::new_at(&genesis, tx, ts);
    assert_eq!(a.hash, b.hash);
}

#[test]
fn reproducible_chains_from_fixed_clock() {
    let ts = "2024-01-01T12:00:00.000000000Z".to_string();
    let mut catalog = bookchain_ledger::Catalog::new();
    let id = catalog.register(dune());

    let build = || {
        let mut chain = Chain::from_genesis(Block::genesis_at(ts.clone()));
        for buyer in ["alice", "bob"] {
            chain
                .append_at(&catalog, purchase(&id, buyer), ts.clone())
                .unwrap();
        }
        chain
    };

    let a = build();
    let b = build();
    assert_eq!(a.blocks(), b.blocks());
}

#[test]
fn concurrent_writers_never_fork_the_chain() {
    let ledger = Arc::new(Ledger::new());
    let id = ledger.register_book(dune()).id;

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let ledger = Arc::clone(&ledger);
            let id = id.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    ledger
                        .submit_transaction(purchase(&id, &format!("{}-{}", t, i)))
                        .unwrap();
                    // Interleave readers with writers.
                    let _ = ledger.blocks();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let blocks = ledger.blocks();
    assert_eq!(blocks.len(), 201);
    assert_linked(&blocks);
}

#[test]
fn blocks_serialize_with_wire_names() {
    let ledger = Ledger::new();
    let id = ledger.register_book(dune()).id;
    ledger.submit_transaction(purchase(&id, "alice")).unwrap();

    let json = serde_json::to_value(ledger.blocks()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1]["Position"], 1);
    assert_eq!(arr[1]["PrevHash"], arr[0]["Hash"]);
    assert_eq!(arr[1]["Data"]["id"], id.as_str());
    assert_eq!(arr[1]["Data"]["buyer"], "alice");
    assert!(arr[1]["TimeStamp"].is_string());
}
