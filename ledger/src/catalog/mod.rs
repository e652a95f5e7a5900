//! # Catalog Module
//!
//! The registry of books that transactions are allowed to reference.
//!
//! ```text
//! book.rs    : Book / NewBook records and identifier derivation
//! registry.rs: The ordered Catalog: register, exists, list
//! ```
//!
//! Identifiers are derived from content (`name,isbn`), so registering the
//! same book twice yields the same identifier twice. Duplicates are kept;
//! nothing in the catalog is ever removed.

pub mod book;
pub mod registry;

pub use book::{book_id, Book, NewBook};
pub use registry::Catalog;
