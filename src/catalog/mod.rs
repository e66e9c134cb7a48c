//! In-memory book catalog
//!
//! The catalog is the authoritative, ordered sequence of book records for a
//! session. It never touches the terminal or the data file; the CLI loads a
//! catalog through `storage::BookFile`, mutates it here, and saves it back.
//!
//! # Invariants
//!
//! - Identifiers are unique within the catalog
//! - New identifiers are `max(id) + 1`, starting at 1
//! - Removal shifts later records forward and never changes a remaining id
//! - A book carries borrower and due date only while it is on loan

mod book;
mod errors;
mod operations;
mod store;

pub use book::{
    bounded, Book, Loan, NewBook, AUTHOR_CAPACITY, BORROWER_CAPACITY, DUE_DATE_CAPACITY,
    ISBN_CAPACITY, TITLE_CAPACITY,
};
pub use errors::{CatalogError, CatalogResult};
pub use store::{next_id, Catalog};
