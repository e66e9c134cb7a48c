//! Catalog mutations
//!
//! Each operation either applies completely or returns an error with the
//! catalog unchanged.

use super::book::{Book, Loan, NewBook};
use super::errors::{CatalogError, CatalogResult};
use super::store::Catalog;

impl Catalog {
    fn index_of(&self, id: u32) -> CatalogResult<usize> {
        self.find_index_by_id(id).ok_or(CatalogError::NotFound(id))
    }

    /// Append a new available book with a fresh id.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the catalog cannot grow, `IdsExhausted` if the
    /// largest id is already `u32::MAX`.
    pub fn add(&mut self, fields: &NewBook) -> CatalogResult<&Book> {
        let id = self.next_id()?;
        self.books.try_reserve(1)?;

        let index = self.books.len();
        self.books.push(Book::new(id, fields));
        Ok(&self.books[index])
    }

    /// Checks that `id` exists and is available, without changing anything.
    pub fn ensure_can_borrow(&self, id: u32) -> CatalogResult<&Book> {
        let book = &self.books[self.index_of(id)?];
        if book.is_borrowed() {
            return Err(CatalogError::AlreadyBorrowed {
                id,
                title: book.title().to_string(),
            });
        }
        Ok(book)
    }

    /// Checks that `id` exists and is on loan, without changing anything.
    pub fn ensure_can_return(&self, id: u32) -> CatalogResult<&Book> {
        let book = &self.books[self.index_of(id)?];
        if !book.is_borrowed() {
            return Err(CatalogError::NotBorrowed {
                id,
                title: book.title().to_string(),
            });
        }
        Ok(book)
    }

    /// Lend book `id` to `borrower` until `due_date`.
    ///
    /// Both strings are truncated to their field capacities.
    pub fn borrow(&mut self, id: u32, borrower: &str, due_date: &str) -> CatalogResult<&Book> {
        self.ensure_can_borrow(id)?;
        let index = self.index_of(id)?;

        let book = &mut self.books[index];
        book.lend(Loan::new(borrower, due_date));
        Ok(&*book)
    }

    /// Mark book `id` as returned, clearing borrower and due date together.
    pub fn return_book(&mut self, id: u32) -> CatalogResult<&Book> {
        self.ensure_can_return(id)?;
        let index = self.index_of(id)?;

        let book = &mut self.books[index];
        book.take_back();
        Ok(&*book)
    }

    /// Remove book `id`, shifting later books forward.
    ///
    /// Ids of the remaining books never change. Ids are always `max + 1`, so
    /// removing the book with the largest id frees that id for the next add.
    pub fn remove(&mut self, id: u32) -> CatalogResult<Book> {
        let index = self.index_of(id)?;
        Ok(self.books.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add(&NewBook::new("Dune", "Frank Herbert", "9780441013593"))
            .unwrap();
        catalog
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut catalog = Catalog::new();
        let first = catalog.add(&NewBook::new("A", "x", "1")).unwrap().id();
        let second = catalog.add(&NewBook::new("B", "x", "2")).unwrap().id();
        let third = catalog.add(&NewBook::new("C", "x", "3")).unwrap().id();
        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_add_after_remove_does_not_reuse_middle_id() {
        let mut catalog = Catalog::new();
        for title in ["A", "B", "C"] {
            catalog.add(&NewBook::new(title, "x", "")).unwrap();
        }
        catalog.remove(2).unwrap();
        let id = catalog.add(&NewBook::new("D", "x", "")).unwrap().id();
        assert_eq!(id, 4);
    }

    #[test]
    fn test_add_truncates_fields() {
        let mut catalog = Catalog::new();
        let long = "t".repeat(150);
        let isbn = "9".repeat(40);
        let book = catalog.add(&NewBook::new(long, "x", isbn)).unwrap();
        assert_eq!(book.title().len(), 99);
        assert_eq!(book.isbn().len(), 19);
    }

    #[test]
    fn test_borrow_sets_loan() {
        let mut catalog = dune_catalog();
        let book = catalog.borrow(1, "Alice", "2025-12-01").unwrap();
        assert!(book.is_borrowed());
        assert_eq!(book.borrower(), "Alice");
        assert_eq!(book.due_date(), "2025-12-01");
    }

    #[test]
    fn test_borrow_twice_fails_and_keeps_first_loan() {
        let mut catalog = dune_catalog();
        catalog.borrow(1, "Alice", "2025-12-01").unwrap();

        let err = catalog.borrow(1, "Bob", "2026-01-01").unwrap_err();
        assert_eq!(
            err,
            CatalogError::AlreadyBorrowed {
                id: 1,
                title: "Dune".into()
            }
        );
        assert_eq!(catalog.get(1).unwrap().borrower(), "Alice");
    }

    #[test]
    fn test_borrow_missing() {
        let mut catalog = dune_catalog();
        assert_eq!(
            catalog.borrow(9, "Alice", "2025-12-01").unwrap_err(),
            CatalogError::NotFound(9)
        );
    }

    #[test]
    fn test_return_clears_loan() {
        let mut catalog = dune_catalog();
        catalog.borrow(1, "Alice", "2025-12-01").unwrap();
        let book = catalog.return_book(1).unwrap();
        assert!(!book.is_borrowed());
        assert_eq!(book.borrower(), "");
        assert_eq!(book.due_date(), "");
    }

    #[test]
    fn test_return_not_borrowed() {
        let mut catalog = dune_catalog();
        let before = catalog.clone();
        assert!(matches!(
            catalog.return_book(1),
            Err(CatalogError::NotBorrowed { id: 1, .. })
        ));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_remove_shifts_and_keeps_ids() {
        let mut catalog = Catalog::new();
        for title in ["A", "B", "C", "D"] {
            catalog.add(&NewBook::new(title, "x", "")).unwrap();
        }
        let removed = catalog.remove(2).unwrap();
        assert_eq!(removed.title(), "B");

        let ids: Vec<u32> = catalog.list().iter().map(Book::id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(catalog.find_index_by_id(3), Some(1));
    }

    #[test]
    fn test_remove_missing() {
        let mut catalog = dune_catalog();
        assert_eq!(catalog.remove(2).unwrap_err(), CatalogError::NotFound(2));
        assert_eq!(catalog.len(), 1);
    }
}
