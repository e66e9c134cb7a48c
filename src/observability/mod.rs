//! Observability for shelf sessions
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle and mutation events
//!
//! # Usage
//!
//! ```ignore
//! use shelf::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::BookAdded, &[("book_id", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_levels() {
        Logger::trace("TEST", &[]);
        Logger::info("TEST", &[]);
        Logger::warn("TEST", &[("k", "v")]);
        Logger::error("TEST", &[]);
        Logger::fatal("TEST", &[]);
        assert!(Logger::enabled(Severity::Fatal));
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::CatalogLoaded, &[("path", "/tmp/books.dat"), ("books", "0")]);
    }
}
