//! Core type definitions for book transactions.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BookTransaction
// ---------------------------------------------------------------------------

/// A purchase of a registered book.
///
/// Field declaration order is the canonical serialization order
/// (`id, buyer, purchase_date, is_genesis`) and feeds straight into the
/// block hash. Do not reorder.
///
/// Missing JSON fields decode to empty strings / `false`, so a bare `{}`
/// is a syntactically valid transaction. It will simply fail the catalog
/// reference check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookTransaction {
    /// Identifier of the referenced catalog record.
    #[serde(rename = "id")]
    pub book_id: String,
    /// Counterparty identifier.
    pub buyer: String,
    /// Purchase date, kept verbatim as submitted.
    pub purchase_date: String,
    /// Marks the synthetic transaction that seeds the chain.
    pub is_genesis: bool,
}

impl BookTransaction {
    /// The synthetic transaction embedded in the genesis block.
    pub fn genesis() -> Self {
        Self {
            is_genesis: true,
            ..Self::default()
        }
    }

    /// Canonical byte form used in the block hash preimage: compact JSON
    /// in declaration order.
    ///
    /// ```
    /// use bookchain_ledger::BookTransaction;
    ///
    /// let tx = BookTransaction::genesis();
    /// assert_eq!(
    ///     tx.canonical_bytes(),
    ///     br#"{"id":"","buyer":"","purchase_date":"","is_genesis":true}"#.to_vec()
    /// );
    /// ```
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // A struct of strings and a bool always serializes.
        serde_json::to_vec(self).unwrap_or_default()
    }
}
