//! Book data file persistence
//!
//! The catalog is stored as a flat file of fixed-size records, rewritten in
//! full on every save.
//!
//! # Design Principles
//!
//! - Whole-file, all-or-nothing load
//! - Truncating save, flushed and fsynced before success is reported
//! - No header, footer or checksum; the size check is the only framing
//! - The file path is configuration, passed in at construction
//!
//! # Failure Modes
//!
//! - Missing or empty file: empty catalog
//! - Size not a multiple of `RECORD_SIZE`: `SHELF_DATA_CORRUPTION`
//! - Undecodable record: `SHELF_DATA_CORRUPTION` with byte offset
//! - Open/read/write failure: I/O error codes, catalog untouched

mod book_file;
mod errors;
mod reader;
mod record;
mod writer;

pub use book_file::{BookFile, DEFAULT_DATA_FILE};
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use reader::StorageReader;
pub use record::{decode_record, encode_record, RECORD_SIZE};
pub use writer::StorageWriter;
