//! Catalog records.

use serde::{Deserialize, Serialize};

use crate::config::{BOOK_ID_BYTES, BOOK_ID_SEPARATOR};
use crate::crypto::hash::blake3_hex_truncated;

/// A registered book. Immutable once it is in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Content-derived identifier, see [`book_id`].
    pub id: String,
    /// Title.
    pub name: String,
    pub author: String,
    /// External catalog number.
    pub isbn: String,
    /// Issue date, kept verbatim as submitted.
    pub launch_date: String,
}

/// A book as submitted for registration, before it has an identifier.
///
/// Missing fields decode as empty strings. An `id` sent by the client is
/// ignored; the catalog always derives its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub isbn: String,
    pub launch_date: String,
}

impl NewBook {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        launch_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            isbn: isbn.into(),
            launch_date: launch_date.into(),
        }
    }

    /// Attach the derived identifier, producing a catalog record.
    pub fn into_book(self) -> Book {
        let id = book_id(&self.name, &self.isbn);
        Book {
            id,
            name: self.name,
            author: self.author,
            isbn: self.isbn,
            launch_date: self.launch_date,
        }
    }
}

/// Derive a catalog identifier: truncated BLAKE3 of `name + "," + isbn`,
/// lowercase hex, always 32 characters.
///
/// Author and launch date do not participate, so two submissions that
/// differ only in those fields share an identifier.
pub fn book_id(name: &str, isbn: &str) -> String {
    let data = format!("{}{}{}", name, BOOK_ID_SEPARATOR, isbn);
    blake3_hex_truncated(data.as_bytes(), BOOK_ID_BYTES)
}
