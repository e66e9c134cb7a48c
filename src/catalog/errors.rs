//! # Catalog Errors

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
///
/// These are expected, local conditions. None of them ends a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Book with ID {0} not found.")]
    NotFound(u32),

    #[error("Book \"{title}\" is already borrowed.")]
    AlreadyBorrowed { id: u32, title: String },

    #[error("Book \"{title}\" is not currently borrowed.")]
    NotBorrowed { id: u32, title: String },

    #[error("Failed to allocate memory for new book: {0}")]
    AllocationFailure(String),

    #[error("No identifiers left after {0}")]
    IdsExhausted(u32),

    #[error("Duplicate book ID {0}")]
    DuplicateId(u32),
}

impl CatalogError {
    /// Short machine-readable name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::AlreadyBorrowed { .. } => "already_borrowed",
            CatalogError::NotBorrowed { .. } => "not_borrowed",
            CatalogError::AllocationFailure(_) => "allocation_failure",
            CatalogError::IdsExhausted(_) => "ids_exhausted",
            CatalogError::DuplicateId(_) => "duplicate_id",
        }
    }
}

impl From<TryReserveError> for CatalogError {
    fn from(e: TryReserveError) -> Self {
        CatalogError::AllocationFailure(e.to_string())
    }
}
