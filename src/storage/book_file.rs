//! Whole-file load and save of the book catalog

use std::path::{Path, PathBuf};

use super::errors::StorageResult;
use super::reader::StorageReader;
use super::writer::StorageWriter;
use crate::catalog::Book;

/// Default data file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "books.dat";

/// The book data file at a configured path.
///
/// Each `load` and `save` opens the file, does all of its work and closes it
/// again; nothing is held open between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFile {
    path: PathBuf,
}

impl BookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every book in the file.
    ///
    /// A missing or empty file is an empty catalog, not an error. Either the
    /// whole file decodes or nothing is returned.
    pub fn load(&self) -> StorageResult<Vec<Book>> {
        let mut reader = match StorageReader::open(&self.path) {
            Ok(reader) => reader,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        reader.read_all()
    }

    /// Replace the file contents with `books`.
    ///
    /// On failure the file may be left truncated or partially written.
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let mut writer = StorageWriter::create(&self.path)?;
        for book in books {
            writer.write(book)?;
        }
        writer.finish()?;
        Ok(())
    }
}

impl Default for BookFile {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
