//! Fixed-size book record format
//!
//! Every record is exactly `RECORD_SIZE` bytes; the data file is a plain
//! concatenation of records with no header, footer or checksum.
//!
//! ```text
//! +------------------+
//! | Book ID          | (u32 LE)
//! +------------------+
//! | Title            | (100 bytes, NUL-padded UTF-8)
//! +------------------+
//! | Author           | (100 bytes, NUL-padded UTF-8)
//! +------------------+
//! | ISBN             | (20 bytes, NUL-padded UTF-8)
//! +------------------+
//! | Borrowed Flag    | (u32 LE: 0 = available, otherwise borrowed)
//! +------------------+
//! | Borrower         | (100 bytes, NUL-padded UTF-8)
//! +------------------+
//! | Due Date         | (11 bytes, NUL-padded UTF-8)
//! +------------------+
//! ```
//!
//! Text fields always end with at least one NUL. A decoder reads each field
//! up to its first NUL, or to capacity if there is none.

use std::io;

use crate::catalog::{
    Book, Loan, AUTHOR_CAPACITY, BORROWER_CAPACITY, DUE_DATE_CAPACITY, ISBN_CAPACITY,
    TITLE_CAPACITY,
};

const ID_OFFSET: usize = 0;
const TITLE_OFFSET: usize = ID_OFFSET + 4;
const AUTHOR_OFFSET: usize = TITLE_OFFSET + TITLE_CAPACITY;
const ISBN_OFFSET: usize = AUTHOR_OFFSET + AUTHOR_CAPACITY;
const BORROWED_OFFSET: usize = ISBN_OFFSET + ISBN_CAPACITY;
const BORROWER_OFFSET: usize = BORROWED_OFFSET + 4;
const DUE_DATE_OFFSET: usize = BORROWER_OFFSET + BORROWER_CAPACITY;

/// Size of one encoded book record in bytes
pub const RECORD_SIZE: usize = DUE_DATE_OFFSET + DUE_DATE_CAPACITY;

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_text(buf: &mut [u8], offset: usize, capacity: usize, text: &str) {
    // Keep the last byte of the field as a terminator
    let bytes = text.as_bytes();
    let len = bytes.len().min(capacity - 1);
    buf[offset..offset + len].copy_from_slice(&bytes[..len]);
}

fn get_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn get_text(data: &[u8], offset: usize, capacity: usize, field: &str) -> io::Result<String> {
    let raw = &data[offset..offset + capacity];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(capacity);

    String::from_utf8(raw[..end].to_vec()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid UTF-8 in {}: {}", field, e),
        )
    })
}

/// Encode a book into its fixed-size record.
pub fn encode_record(book: &Book) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];

    put_u32(&mut buf, ID_OFFSET, book.id());
    put_text(&mut buf, TITLE_OFFSET, TITLE_CAPACITY, book.title());
    put_text(&mut buf, AUTHOR_OFFSET, AUTHOR_CAPACITY, book.author());
    put_text(&mut buf, ISBN_OFFSET, ISBN_CAPACITY, book.isbn());
    put_u32(&mut buf, BORROWED_OFFSET, u32::from(book.is_borrowed()));
    put_text(&mut buf, BORROWER_OFFSET, BORROWER_CAPACITY, book.borrower());
    put_text(&mut buf, DUE_DATE_OFFSET, DUE_DATE_CAPACITY, book.due_date());

    buf
}

/// Decode one record.
///
/// `data` must be exactly `RECORD_SIZE` bytes. Borrower and due date are
/// only read when the borrowed flag is set. Ids start at 1, so a zero id is
/// invalid data.
pub fn decode_record(data: &[u8]) -> io::Result<Book> {
    if data.len() != RECORD_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Record size mismatch: expected {} bytes, got {}",
                RECORD_SIZE,
                data.len()
            ),
        ));
    }

    let id = get_u32(data, ID_OFFSET);
    if id == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "Book ID 0 is not valid"));
    }
    let title = get_text(data, TITLE_OFFSET, TITLE_CAPACITY, "title")?;
    let author = get_text(data, AUTHOR_OFFSET, AUTHOR_CAPACITY, "author")?;
    let isbn = get_text(data, ISBN_OFFSET, ISBN_CAPACITY, "isbn")?;

    let loan = if get_u32(data, BORROWED_OFFSET) != 0 {
        let borrower = get_text(data, BORROWER_OFFSET, BORROWER_CAPACITY, "borrower")?;
        let due_date = get_text(data, DUE_DATE_OFFSET, DUE_DATE_CAPACITY, "due date")?;
        Some(Loan::new(&borrower, &due_date))
    } else {
        None
    };

    Ok(Book::from_parts(id, &title, &author, &isbn, loan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewBook;

    fn sample_book() -> Book {
        Book::new(1, &NewBook::new("Dune", "Frank Herbert", "9780441013593"))
    }

    #[test]
    fn test_record_size() {
        assert_eq!(RECORD_SIZE, 339);
        assert_eq!(encode_record(&sample_book()).len(), RECORD_SIZE);
    }

    #[test]
    fn test_available_book_roundtrip() {
        let book = sample_book();
        let decoded = decode_record(&encode_record(&book)).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_borrowed_book_roundtrip() {
        let book = Book::from_parts(
            12,
            "Dune Messiah",
            "Frank Herbert",
            "",
            Some(Loan::new("Alice", "2025-12-01")),
        );
        let decoded = decode_record(&encode_record(&book)).unwrap();
        assert_eq!(decoded, book);
        assert_eq!(decoded.borrower(), "Alice");
    }

    #[test]
    fn test_layout_is_little_endian_and_padded() {
        let bytes = encode_record(&sample_book());
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[TITLE_OFFSET..TITLE_OFFSET + 4], b"Dune");
        assert!(bytes[TITLE_OFFSET + 4..AUTHOR_OFFSET].iter().all(|&b| b == 0));
        assert_eq!(&bytes[BORROWED_OFFSET..BORROWED_OFFSET + 4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_full_width_field_keeps_terminator() {
        let title = "t".repeat(TITLE_CAPACITY);
        let book = Book::from_parts(1, &title, "a", "i", None);
        let bytes = encode_record(&book);
        assert_eq!(bytes[AUTHOR_OFFSET - 1], 0);
        assert_eq!(decode_record(&bytes).unwrap().title().len(), TITLE_CAPACITY - 1);
    }

    #[test]
    fn test_unterminated_field_stops_at_capacity() {
        let mut bytes = encode_record(&sample_book());
        for b in &mut bytes[ISBN_OFFSET..BORROWED_OFFSET] {
            *b = b'7';
        }
        let decoded = decode_record(&bytes).unwrap();
        // Decoded text is re-bounded to leave room for the terminator
        assert_eq!(decoded.isbn(), "7".repeat(ISBN_CAPACITY - 1));
    }

    #[test]
    fn test_borrower_ignored_when_flag_clear() {
        let mut bytes = encode_record(&sample_book());
        bytes[BORROWER_OFFSET..BORROWER_OFFSET + 3].copy_from_slice(b"Bob");
        let decoded = decode_record(&bytes).unwrap();
        assert!(!decoded.is_borrowed());
        assert_eq!(decoded.borrower(), "");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut bytes = encode_record(&sample_book());
        bytes[AUTHOR_OFFSET] = 0xFF;
        let err = decode_record(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("author"));
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let mut bytes = encode_record(&sample_book());
        bytes[ID_OFFSET..ID_OFFSET + 4].copy_from_slice(&0u32.to_le_bytes());
        let err = decode_record(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("ID 0"));
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let bytes = encode_record(&sample_book());
        assert!(decode_record(&bytes[..RECORD_SIZE - 1]).is_err());
    }
}
