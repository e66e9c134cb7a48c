//! Observable events
//!
//! Every log line written by the session names one of these events.

use std::fmt;

use super::Severity;

/// Observable events in a shelf session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Interactive session started
    SessionStart,
    /// Interactive session ended
    SessionEnd,

    // Persistence
    /// Catalog loaded from the data file
    CatalogLoaded,
    /// Catalog could not be loaded (session cannot start)
    CatalogLoadFailed,
    /// Catalog written to the data file
    CatalogSaved,
    /// Catalog could not be written
    CatalogSaveFailed,

    // Mutations
    /// Book appended
    BookAdded,
    /// Book lent out
    BookBorrowed,
    /// Book returned
    BookReturned,
    /// Book removed
    BookRemoved,
    /// Mutation refused (not found, already borrowed, ...)
    MutationRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",

            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::CatalogLoadFailed => "CATALOG_LOAD_FAILED",
            Event::CatalogSaved => "CATALOG_SAVED",
            Event::CatalogSaveFailed => "CATALOG_SAVE_FAILED",

            Event::BookAdded => "BOOK_ADDED",
            Event::BookBorrowed => "BOOK_BORROWED",
            Event::BookReturned => "BOOK_RETURNED",
            Event::BookRemoved => "BOOK_REMOVED",
            Event::MutationRejected => "MUTATION_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CatalogLoadFailed => Severity::Fatal,
            Event::CatalogSaveFailed => Severity::Error,
            Event::MutationRejected => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
