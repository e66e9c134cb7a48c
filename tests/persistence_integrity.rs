//! Persistence Integrity Tests
//!
//! - save followed by load reproduces the catalog exactly
//! - Missing and empty files load as empty catalogs
//! - Files that are not a whole number of records are corrupt
//! - Failed loads never return partial data

use shelf::catalog::{Book, Catalog, NewBook};
use shelf::storage::{BookFile, StorageErrorCode, RECORD_SIZE};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .add(&NewBook::new("Dune", "Frank Herbert", "9780441013593"))
        .unwrap();
    catalog
        .add(&NewBook::new("Emma", "Jane Austen", "9780141439587"))
        .unwrap();
    catalog
        .add(&NewBook::new("Ficciones", "Jorge Luis Borges", ""))
        .unwrap();
    catalog.borrow(2, "Alice", "2025-12-01").unwrap();
    catalog.remove(3).unwrap();
    catalog
        .add(&NewBook::new("Beloved", "Toni Morrison", "9781400033416"))
        .unwrap();
    catalog
}

// =============================================================================
// Round Trip
// =============================================================================

/// save then load gives back the same books in the same order.
#[test]
fn test_save_load_roundtrip() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    let catalog = sample_catalog();

    file.save(catalog.list()).unwrap();
    let loaded = Catalog::from_books(file.load().unwrap()).unwrap();

    assert_eq!(loaded, catalog);
    assert_eq!(loaded.get(2).unwrap().borrower(), "Alice");
    assert_eq!(loaded.next_id().unwrap(), 4);
}

/// File size is always count × RECORD_SIZE.
#[test]
fn test_file_size_matches_record_count() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    let catalog = sample_catalog();

    file.save(catalog.list()).unwrap();

    let size = fs::metadata(file.path()).unwrap().len();
    assert_eq!(size, (catalog.len() * RECORD_SIZE) as u64);
}

/// Removing the only book yields an empty file that still loads.
#[test]
fn test_empty_catalog_roundtrip() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));

    let mut catalog = Catalog::new();
    catalog.add(&NewBook::new("Solo", "A", "I")).unwrap();
    file.save(catalog.list()).unwrap();

    catalog.remove(1).unwrap();
    file.save(catalog.list()).unwrap();

    assert_eq!(fs::metadata(file.path()).unwrap().len(), 0);
    assert!(file.load().unwrap().is_empty());
}

/// Saving fewer books than before shrinks the file.
#[test]
fn test_save_truncates_previous_contents() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    let catalog = sample_catalog();
    file.save(catalog.list()).unwrap();

    let first: Vec<Book> = catalog.list()[..1].to_vec();
    file.save(&first).unwrap();

    assert_eq!(file.load().unwrap(), first);
}

// =============================================================================
// First Run
// =============================================================================

/// A missing data file is an empty catalog, not an error.
#[test]
fn test_missing_file_is_empty_catalog() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("never-written.dat"));

    assert!(file.load().unwrap().is_empty());
    assert!(!file.path().exists());
}

// =============================================================================
// Corruption
// =============================================================================

/// A truncated file fails with corruption and yields no books.
#[test]
fn test_truncated_file_is_corrupt() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    file.save(sample_catalog().list()).unwrap();

    let mut bytes = fs::read(file.path()).unwrap();
    bytes.pop();
    fs::write(file.path(), bytes).unwrap();

    let err = file.load().unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::ShelfDataCorruption);
    assert!(err.is_fatal());
}

/// Trailing garbage is also corruption.
#[test]
fn test_appended_bytes_are_corrupt() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    file.save(sample_catalog().list()).unwrap();

    let mut bytes = fs::read(file.path()).unwrap();
    bytes.extend_from_slice(b"junk");
    fs::write(file.path(), bytes).unwrap();

    assert!(file.load().unwrap_err().is_corruption());
}

/// An undecodable record in the middle fails the whole load.
#[test]
fn test_bad_record_fails_whole_load() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    file.save(sample_catalog().list()).unwrap();

    let mut bytes = fs::read(file.path()).unwrap();
    // Title of the last record
    let last = bytes.len() - RECORD_SIZE;
    bytes[last + 4] = 0xC3;
    bytes[last + 5] = 0x28;
    fs::write(file.path(), bytes).unwrap();

    let err = file.load().unwrap_err();
    assert!(err.is_corruption());
    assert!(err.to_string().contains(&format!("byte_offset: {}", last)));
}

/// Ids start at 1; a record carrying id 0 is corrupt.
#[test]
fn test_zero_id_record_is_corrupt() {
    let temp_dir = create_temp_data_dir();
    let file = BookFile::new(temp_dir.path().join("books.dat"));
    file.save(sample_catalog().list()).unwrap();

    let mut bytes = fs::read(file.path()).unwrap();
    let second = RECORD_SIZE;
    bytes[second..second + 4].copy_from_slice(&0u32.to_le_bytes());
    fs::write(file.path(), bytes).unwrap();

    let err = file.load().unwrap_err();
    assert_eq!(err.code(), StorageErrorCode::ShelfDataCorruption);
    assert_eq!(err.details(), Some(format!("byte_offset: {}", second).as_str()));
}
