//! Transaction construction via the builder pattern.
//!
//! Handy in tests and benches; HTTP callers decode [`BookTransaction`]
//! straight from JSON instead.

use chrono::Utc;

use super::types::BookTransaction;

/// Fluent builder for [`BookTransaction`].
///
/// The purchase date defaults to today's UTC date (`YYYY-MM-DD`) when not
/// set explicitly.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    book_id: String,
    buyer: String,
    purchase_date: Option<String>,
}

impl TransactionBuilder {
    /// Start a purchase of the book identified by `book_id`.
    pub fn new(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            ..Self::default()
        }
    }

    pub fn buyer(mut self, buyer: impl Into<String>) -> Self {
        self.buyer = buyer.into();
        self
    }

    pub fn purchase_date(mut self, date: impl Into<String>) -> Self {
        self.purchase_date = Some(date.into());
        self
    }

    /// Finish construction. Builders never produce genesis transactions.
    pub fn build(self) -> BookTransaction {
        BookTransaction {
            book_id: self.book_id,
            buyer: self.buyer,
            purchase_date: self
                .purchase_date
                .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
            is_genesis: false,
        }
    }
}
