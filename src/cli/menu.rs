//! Interactive menu session
//!
//! The session owns the catalog for its whole lifetime. It loads it once,
//! dispatches menu choices into catalog operations, saves after every
//! successful mutation and (optionally) once more on exit.

use std::io::{BufRead, Write};

use super::commands::load_catalog;
use super::errors::{CliError, CliResult};
use super::prompt::Prompt;
use crate::catalog::{
    Book, Catalog, CatalogError, NewBook, AUTHOR_CAPACITY, BORROWER_CAPACITY, ISBN_CAPACITY,
    TITLE_CAPACITY,
};
use crate::observability::{log_event_with_fields, Event};
use crate::storage::BookFile;

/// Largest id the menu will accept
pub const MAX_BOOK_ID: u32 = 1_000_000_000;

const RULE: &str = "------------------------------------------------------------";
const BANNER: &str = "=============================================";

/// Write the display block for one book
pub fn write_book<W: Write>(out: &mut W, book: &Book) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "ID        : {}", book.id())?;
    writeln!(out, "Title     : {}", book.title())?;
    writeln!(out, "Author    : {}", book.author())?;
    writeln!(out, "ISBN      : {}", book.isbn())?;

    match book.loan() {
        Some(loan) => {
            writeln!(out, "Status    : Borrowed")?;
            writeln!(out, "Borrower  : {}", loan.borrower())?;
            writeln!(out, "Due Date  : {}", loan.due_date())?;
        }
        None => writeln!(out, "Status    : Available")?,
    }
    Ok(())
}

/// A refused mutation is an ordinary outcome for the menu
fn rejected(operation: &str, e: &CatalogError) -> CliResult<()> {
    log_event_with_fields(
        Event::MutationRejected,
        &[("operation", operation), ("reason", e.kind())],
    );
    Ok(())
}

/// One operator session over a loaded catalog
pub struct Session<R, W> {
    catalog: Catalog,
    file: BookFile,
    save_on_exit: bool,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Load the catalog and prepare a session.
    ///
    /// # Errors
    ///
    /// `SHELF_CLI_BOOT_FAILED` if the data file cannot be loaded; no session
    /// is created in that case.
    pub fn open(file: BookFile, save_on_exit: bool, prompt: Prompt<R, W>) -> CliResult<Self> {
        let catalog = load_catalog(&file)?;
        Ok(Self {
            catalog,
            file,
            save_on_exit,
            prompt,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tear the session down, returning the prompt's reader and writer
    pub fn into_inner(self) -> (R, W) {
        self.prompt.into_inner()
    }

    /// Run the menu until the operator exits or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        let path = self.file.path().display().to_string();
        let books = self.catalog.len().to_string();
        log_event_with_fields(Event::SessionStart, &[("path", &path), ("books", &books)]);

        let result = self.menu_loop();
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    fn menu_loop(&mut self) -> CliResult<()> {
        loop {
            self.print_menu()?;
            let choice = match self.prompt.read_int("Enter your choice: ", 0, 6) {
                Ok(choice) => choice,
                Err(e) if e.is_end_of_input() => return Ok(()),
                Err(e) => return Err(e),
            };

            if choice == 0 {
                return Ok(());
            }

            let step = self
                .dispatch(choice)
                .and_then(|()| self.prompt.press_enter());
            match step {
                Ok(()) => {}
                Err(e) if e.is_end_of_input() => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }

    fn shutdown(&mut self) -> CliResult<()> {
        if self.save_on_exit {
            self.persist("failed to save library data on exit");
        }

        let books = self.catalog.len().to_string();
        log_event_with_fields(Event::SessionEnd, &[("books", &books)]);

        let out = self.prompt.output();
        writeln!(out, "Goodbye.")?;
        out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> CliResult<()> {
        let out = self.prompt.output();
        writeln!(out)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "   Simple Library Management System")?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "1. List all books")?;
        writeln!(out, "2. Search books by title")?;
        writeln!(out, "3. Add a new book")?;
        writeln!(out, "4. Borrow a book")?;
        writeln!(out, "5. Return a book")?;
        writeln!(out, "6. Remove a book")?;
        writeln!(out, "0. Exit")?;
        writeln!(out, "{}", BANNER)?;
        Ok(())
    }

    fn dispatch(&mut self, choice: i64) -> CliResult<()> {
        match choice {
            1 => self.list(),
            2 => self.search(),
            3 => self.add(),
            4 => self.borrow(),
            5 => self.return_book(),
            6 => self.remove(),
            _ => {
                writeln!(self.prompt.output(), "Unknown option.")?;
                Ok(())
            }
        }
    }

    fn list(&mut self) -> CliResult<()> {
        let out = self.prompt.output();
        let books = self.catalog.list();
        if books.is_empty() {
            writeln!(out, "No books in the library.")?;
            return Ok(());
        }

        writeln!(
            out,
            "\n=== Library Inventory ({} book{}) ===",
            books.len(),
            if books.len() == 1 { "" } else { "s" }
        )?;
        for book in books {
            write_book(out, book)?;
        }
        Ok(())
    }

    fn search(&mut self) -> CliResult<()> {
        if self.catalog.is_empty() {
            writeln!(self.prompt.output(), "No books in the library.")?;
            return Ok(());
        }

        let keyword = self
            .prompt
            .read_line("Enter title keyword to search: ", TITLE_CAPACITY)?;

        let out = self.prompt.output();
        if keyword.is_empty() {
            writeln!(out, "Search term is empty. Aborting search.")?;
            return Ok(());
        }

        writeln!(out, "\nSearch results for \"{}\":", keyword)?;
        let mut matches = 0;
        for book in self.catalog.search_by_title(&keyword) {
            write_book(out, book)?;
            matches += 1;
        }

        if matches == 0 {
            writeln!(out, "No books found matching the given keyword.")?;
        } else {
            writeln!(out, "Total matches: {}", matches)?;
        }
        Ok(())
    }

    fn add(&mut self) -> CliResult<()> {
        let title = self.prompt.read_line("Enter book title: ", TITLE_CAPACITY)?;
        let author = self.prompt.read_line("Enter book author: ", AUTHOR_CAPACITY)?;
        let isbn = self.prompt.read_line("Enter book ISBN: ", ISBN_CAPACITY)?;

        let id = match self.catalog.add(&NewBook::new(title, author, isbn)) {
            Ok(book) => book.id(),
            Err(e) => {
                writeln!(self.prompt.output(), "Error: {}", e)?;
                return rejected("add", &e);
            }
        };

        writeln!(
            self.prompt.output(),
            "Book added successfully with ID {}.",
            id
        )?;
        log_event_with_fields(Event::BookAdded, &[("book_id", &id.to_string())]);
        self.persist("failed to save after adding book");
        Ok(())
    }

    fn read_book_id(&mut self, action: &str) -> CliResult<u32> {
        let prompt = format!("Enter the ID of the book to {}: ", action);
        let id = self.prompt.read_int(&prompt, 1, i64::from(MAX_BOOK_ID))?;
        u32::try_from(id).map_err(|_| CliError::invalid_argument(format!("Invalid book ID {}", id)))
    }

    fn borrow(&mut self) -> CliResult<()> {
        if self.catalog.is_empty() {
            writeln!(self.prompt.output(), "No books available to borrow.")?;
            return Ok(());
        }

        let id = self.read_book_id("borrow")?;
        if let Err(e) = self.catalog.ensure_can_borrow(id) {
            writeln!(self.prompt.output(), "{}", e)?;
            return rejected("borrow", &e);
        }

        let borrower = self
            .prompt
            .read_line("Enter borrower name: ", BORROWER_CAPACITY)?;
        let due_date = self.prompt.read_date("Enter due date (YYYY-MM-DD): ")?;

        let (title, borrower) = match self.catalog.borrow(id, &borrower, &due_date) {
            Ok(book) => (book.title().to_string(), book.borrower().to_string()),
            Err(e) => {
                writeln!(self.prompt.output(), "{}", e)?;
                return rejected("borrow", &e);
            }
        };

        writeln!(
            self.prompt.output(),
            "Book \"{}\" successfully borrowed by {}.",
            title,
            borrower
        )?;
        log_event_with_fields(
            Event::BookBorrowed,
            &[("book_id", &id.to_string()), ("due_date", &due_date)],
        );
        self.persist("failed to save after borrowing book");
        Ok(())
    }

    fn return_book(&mut self) -> CliResult<()> {
        if self.catalog.is_empty() {
            writeln!(self.prompt.output(), "No books available.")?;
            return Ok(());
        }

        let id = self.read_book_id("return")?;
        let title = match self.catalog.return_book(id) {
            Ok(book) => book.title().to_string(),
            Err(e) => {
                writeln!(self.prompt.output(), "{}", e)?;
                return rejected("return", &e);
            }
        };

        writeln!(
            self.prompt.output(),
            "Book \"{}\" has been returned and is now available.",
            title
        )?;
        log_event_with_fields(Event::BookReturned, &[("book_id", &id.to_string())]);
        self.persist("failed to save after returning book");
        Ok(())
    }

    fn remove(&mut self) -> CliResult<()> {
        if self.catalog.is_empty() {
            writeln!(self.prompt.output(), "No books to remove.")?;
            return Ok(());
        }

        let id = self.read_book_id("remove")?;
        if let Err(e) = self.catalog.remove(id) {
            writeln!(self.prompt.output(), "{}", e)?;
            return rejected("remove", &e);
        }

        writeln!(
            self.prompt.output(),
            "Book with ID {} removed from library.",
            id
        )?;
        log_event_with_fields(Event::BookRemoved, &[("book_id", &id.to_string())]);
        self.persist("failed to save after removing book");
        Ok(())
    }

    /// Save the catalog; failure is reported and the session goes on.
    fn persist(&self, warning: &str) {
        let path = self.file.path().display().to_string();
        match self.file.save(self.catalog.list()) {
            Ok(()) => {
                let books = self.catalog.len().to_string();
                log_event_with_fields(Event::CatalogSaved, &[("path", &path), ("books", &books)]);
            }
            Err(e) => {
                eprintln!("Warning: {}.", warning);
                log_event_with_fields(
                    Event::CatalogSaveFailed,
                    &[("path", &path), ("error", &e.to_string())],
                );
            }
        }
    }
}
