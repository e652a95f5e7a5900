//! Error types for the ledger.
//!
//! Every operation that can fail returns a [`LedgerError`]. Failures are
//! terminal for the request that caused them: nothing is partially
//! committed, and nothing is retried.

use thiserror::Error;

/// Errors raised by catalog registration and chain appends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The request body could not be decoded into the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A transaction names a book that was never registered.
    #[error("invalid reference: book {0} is not in the catalog")]
    InvalidReference(String),

    /// A freshly constructed block does not link to the current tip.
    /// The candidate is discarded and never appended.
    #[error("chain integrity violated at position {position}: expected prev_hash {expected}, got {got}")]
    ChainIntegrity {
        /// Position of the rejected candidate.
        position: u64,
        /// Hash of the current last block.
        expected: String,
        /// Previous hash carried by the candidate.
        got: String,
    },
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::MalformedInput(err.to_string())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_malformed_input() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let ledger_err: LedgerError = err.into();
        assert!(matches!(ledger_err, LedgerError::MalformedInput(_)));
    }

    #[test]
    fn integrity_error_message_names_both_hashes() {
        let err = LedgerError::ChainIntegrity {
            position: 3,
            expected: "aa".into(),
            got: "bb".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("aa"));
        assert!(msg.contains("bb"));
    }
}
