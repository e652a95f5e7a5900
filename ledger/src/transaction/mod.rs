//! # Transaction Module
//!
//! The purchase record sealed into every block.
//!
//! ```text
//! types.rs  : BookTransaction and its canonical byte form
//! builder.rs: Fluent TransactionBuilder
//! ```
//!
//! A transaction is plain data. It carries no signature and no identifier
//! of its own; its identity is the block that seals it.

pub mod builder;
pub mod types;

pub use builder::TransactionBuilder;
pub use types::BookTransaction;
