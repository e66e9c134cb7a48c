//! Sequential reader over a book data file
//!
//! The size check happens once at open: a file whose length is not a whole
//! number of records is corrupt and yields no reader at all.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::{decode_record, RECORD_SIZE};
use crate::catalog::Book;

/// Reads fixed-size book records front to back.
pub struct StorageReader {
    /// Buffered reader
    reader: BufReader<File>,
    /// Current byte offset
    current_offset: u64,
    /// Total file size
    file_size: u64,
}

impl StorageReader {
    /// Opens the data file and validates its size.
    ///
    /// # Errors
    ///
    /// - `SHELF_STORAGE_IO_ERROR` if the file cannot be opened or inspected
    ///   (including when it does not exist; see `StorageError::is_not_found`)
    /// - `SHELF_DATA_CORRUPTION` if the size is not a multiple of `RECORD_SIZE`
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = File::open(path).map_err(|e| {
            StorageError::io_error(format!("Failed to open data file: {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StorageError::io_error("Failed to read file metadata", e))?
            .len();

        if file_size % RECORD_SIZE as u64 != 0 {
            return Err(StorageError::data_corruption(format!(
                "Data file size {} is not a multiple of record size {}",
                file_size, RECORD_SIZE
            )));
        }

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Returns the current read offset.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Number of records in the file
    pub fn record_count(&self) -> usize {
        (self.file_size / RECORD_SIZE as u64) as usize
    }

    /// Returns whether there are more records to read.
    pub fn has_more(&self) -> bool {
        self.current_offset < self.file_size
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(book))` if a record was read
    /// - `Ok(None)` at end of file
    /// - `Err(SHELF_STORAGE_READ_FAILED)` if the bytes cannot be read
    /// - `Err(SHELF_DATA_CORRUPTION)` if the record does not decode
    pub fn read_next(&mut self) -> StorageResult<Option<Book>> {
        if !self.has_more() {
            return Ok(None);
        }

        let mut buf = [0u8; RECORD_SIZE];
        self.reader.read_exact(&mut buf).map_err(|e| {
            StorageError::read_failed(
                format!("Failed to read record at offset {}", self.current_offset),
                e,
            )
        })?;

        let book = decode_record(&buf)
            .map_err(|e| StorageError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += RECORD_SIZE as u64;

        Ok(Some(book))
    }

    /// Reads all remaining records.
    ///
    /// Any failure discards everything read so far.
    pub fn read_all(&mut self) -> StorageResult<Vec<Book>> {
        let mut books = Vec::with_capacity(self.record_count());

        while let Some(book) = self.read_next()? {
            books.push(book);
        }

        Ok(books)
    }
}
