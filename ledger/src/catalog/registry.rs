//! Ordered, append-only book registry.

use super::book::{Book, NewBook};

/// All registered books, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a book and return its derived identifier.
    ///
    /// No uniqueness check: submitting the same name and ISBN twice
    /// stores two entries that share one identifier.
    pub fn register(&mut self, record: NewBook) -> String {
        self.insert(record).id.clone()
    }

    /// Register a book and return the stored record.
    pub fn insert(&mut self, record: NewBook) -> &Book {
        self.books.push(record.into_book());
        &self.books[self.books.len() - 1]
    }

    /// Whether any registered book carries `id`. Linear scan.
    pub fn exists(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    /// First registered book carrying `id`.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Every registered book, in registration order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
