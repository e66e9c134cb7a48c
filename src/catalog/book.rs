//! Book records and their bounded text fields
//!
//! Every text field has a fixed capacity in bytes, counted the way the data
//! file stores it: the capacity includes one terminating NUL, so a field holds
//! at most `capacity - 1` bytes of UTF-8.

use serde::Serialize;

/// Title capacity in bytes (including the terminator)
pub const TITLE_CAPACITY: usize = 100;
/// Author capacity in bytes (including the terminator)
pub const AUTHOR_CAPACITY: usize = 100;
/// ISBN capacity in bytes (including the terminator)
pub const ISBN_CAPACITY: usize = 20;
/// Borrower name capacity in bytes (including the terminator)
pub const BORROWER_CAPACITY: usize = 100;
/// Due date capacity in bytes: "YYYY-MM-DD" plus the terminator
pub const DUE_DATE_CAPACITY: usize = 11;

/// Truncates `text` so it fits a field of `capacity` bytes.
///
/// Text stops at the first NUL and is cut on a character boundary.
pub fn bounded(text: &str, capacity: usize) -> String {
    let text = match text.find('\0') {
        Some(nul) => &text[..nul],
        None => text,
    };

    let limit = capacity.saturating_sub(1);
    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Operator-supplied fields for a book that does not have an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl NewBook {
    /// Create a new book description
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }
}

/// An active loan: who has the book and when it is due back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loan {
    borrower: String,
    due_date: String,
}

impl Loan {
    /// Create a loan, truncating both fields to their capacities
    pub fn new(borrower: &str, due_date: &str) -> Self {
        Self {
            borrower: bounded(borrower, BORROWER_CAPACITY),
            due_date: bounded(due_date, DUE_DATE_CAPACITY),
        }
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn due_date(&self) -> &str {
        &self.due_date
    }
}

/// A single book record.
///
/// The borrow state is an `Option<Loan>`, so a book that is not borrowed
/// has no borrower or due date to speak of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    id: u32,
    title: String,
    author: String,
    isbn: String,
    loan: Option<Loan>,
}

impl Book {
    /// Create an available book with the given id
    pub fn new(id: u32, fields: &NewBook) -> Self {
        Self::from_parts(id, &fields.title, &fields.author, &fields.isbn, None)
    }

    /// Rebuild a book from stored parts.
    ///
    /// Used by the decoder; text fields are bounded like any other input.
    pub fn from_parts(
        id: u32,
        title: &str,
        author: &str,
        isbn: &str,
        loan: Option<Loan>,
    ) -> Self {
        Self {
            id,
            title: bounded(title, TITLE_CAPACITY),
            author: bounded(author, AUTHOR_CAPACITY),
            isbn: bounded(isbn, ISBN_CAPACITY),
            loan,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Returns the active loan, if any
    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    pub fn is_borrowed(&self) -> bool {
        self.loan.is_some()
    }

    /// Borrower name, empty when the book is available
    pub fn borrower(&self) -> &str {
        self.loan.as_ref().map(Loan::borrower).unwrap_or("")
    }

    /// Due date, empty when the book is available
    pub fn due_date(&self) -> &str {
        self.loan.as_ref().map(Loan::due_date).unwrap_or("")
    }

    pub(crate) fn lend(&mut self, loan: Loan) {
        self.loan = Some(loan);
    }

    pub(crate) fn take_back(&mut self) -> Option<Loan> {
        self.loan.take()
    }
}
