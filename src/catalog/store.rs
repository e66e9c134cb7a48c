//! Ordered book storage and identifier queries

use std::collections::HashSet;

use super::book::Book;
use super::errors::{CatalogError, CatalogResult};

/// Returns the id the next added book should receive.
///
/// One past the largest id in `books`, or 1 for an empty slice.
pub fn next_id(books: &[Book]) -> CatalogResult<u32> {
    match books.iter().map(Book::id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(CatalogError::IdsExhausted(max)),
    }
}

/// The in-memory book catalog.
///
/// Books keep insertion order; removal shifts later books forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub(super) books: Vec<Book>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Build a catalog from loaded records.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two records share an id.
    pub fn from_books(books: Vec<Book>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id()) {
                return Err(CatalogError::DuplicateId(book.id()));
            }
        }
        Ok(Self { books })
    }

    /// Position of the first book with `id`
    pub fn find_index_by_id(&self, id: u32) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }

    pub fn get(&self, id: u32) -> Option<&Book> {
        self.find_index_by_id(id).map(|index| &self.books[index])
    }

    /// Read-only view of every book in catalog order
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Books whose title contains `keyword` (case-sensitive).
    ///
    /// Empty keywords are rejected by the caller; an empty keyword here
    /// matches every book.
    pub fn search_by_title<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books
            .iter()
            .filter(move |book| book.title().contains(keyword))
    }

    /// The id the next `add` will assign
    pub fn next_id(&self) -> CatalogResult<u32> {
        next_id(&self.books)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Consume the catalog, returning its books in order
    pub fn into_books(self) -> Vec<Book> {
        self.books
    }
}
