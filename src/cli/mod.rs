//! CLI module for shelf
//!
//! Provides the operator-facing boundary around the catalog:
//! - menu: interactive session on stdin/stdout
//! - list: print the catalog as JSON
//! - search: print title matches as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;
mod prompt;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{boot, list, load_catalog, menu, run, run_command, search};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
pub use menu::{write_book, Session, MAX_BOOK_ID};
pub use prompt::{Prompt, DATE_FORMAT};
