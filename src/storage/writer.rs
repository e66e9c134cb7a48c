//! Truncating writer for book data files
//!
//! A writer always starts from an empty file. Records are buffered and the
//! file is flushed and fsynced by `finish`; a writer dropped without
//! `finish` may leave a partial file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::{encode_record, RECORD_SIZE};
use crate::catalog::Book;

/// Writes fixed-size book records to a freshly truncated file.
pub struct StorageWriter {
    /// Buffered file handle
    writer: BufWriter<File>,
    /// Records written so far
    records_written: usize,
}

impl StorageWriter {
    /// Creates (or truncates) the data file.
    ///
    /// Creates parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns `SHELF_STORAGE_WRITE_FAILED` if the file cannot be created.
    pub fn create(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::write_failed(
                        format!("Failed to create data directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            StorageError::write_failed(
                format!("Failed to open data file for writing: {}", path.display()),
                e,
            )
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            records_written: 0,
        })
    }

    /// Appends one record.
    pub fn write(&mut self, book: &Book) -> StorageResult<()> {
        self.writer.write_all(&encode_record(book)).map_err(|e| {
            StorageError::write_failed(format!("Failed to write book {}", book.id()), e)
        })?;
        self.records_written += 1;
        Ok(())
    }

    /// Flushes buffered records and fsyncs the file.
    ///
    /// Returns the number of bytes in the file.
    pub fn finish(self) -> StorageResult<u64> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| StorageError::write_failed("Failed to flush data file", e.into_error()))?;

        // fsync - the save is not reported until the bytes are on disk
        file.sync_all()
            .map_err(|e| StorageError::write_failed("fsync failed after writing data file", e))?;

        Ok((self.records_written * RECORD_SIZE) as u64)
    }
}
