//! CLI command implementations
//!
//! Every command boots the same way: load configuration, set the log level,
//! load the catalog. A catalog that cannot be loaded ends the command before
//! any work is done.

use std::io::{self, Write};
use std::path::Path;

use crate::catalog::{Book, Catalog};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::storage::{BookFile, StorageError};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};
use super::menu::Session;
use super::prompt::Prompt;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command.unwrap_or_default())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Menu { config } => menu(&config),
        Command::List { config } => json_command(|out| list(&config, out)),
        Command::Search { keyword, config } => json_command(|out| search(&config, &keyword, out)),
    }
}

/// Run a JSON-printing command, reporting failure as a JSON error too
fn json_command<F>(command: F) -> CliResult<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> CliResult<()>,
{
    let mut out = io::stdout().lock();
    let result = command(&mut out);
    if let Err(ref e) = result {
        write_error(&mut out, e.code_str(), e.message())?;
    }
    result
}

/// Load configuration and apply its log level
pub fn boot(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let config_display = config_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("config", &config_display), ("data_file", &config.data_file)],
    );
    Ok(config)
}

/// Load the data file into a catalog.
///
/// Storage failures and duplicate ids are both boot failures. The failure
/// event carries the storage code, its severity and the byte offset of a
/// corrupt record when there is one.
pub fn load_catalog(file: &BookFile) -> CliResult<Catalog> {
    let path = file.path().display().to_string();

    let books = match file.load() {
        Ok(books) => books,
        Err(e) => {
            log_storage_failure(&path, &e);
            return Err(CliError::from(e));
        }
    };

    match Catalog::from_books(books) {
        Ok(catalog) => {
            let books = catalog.len().to_string();
            log_event_with_fields(Event::CatalogLoaded, &[("path", &path), ("books", &books)]);
            Ok(catalog)
        }
        Err(e) => {
            log_event_with_fields(
                Event::CatalogLoadFailed,
                &[("path", &path), ("error", e.kind())],
            );
            Err(CliError::boot_failed(format!("Failed to load library data: {}", e)))
        }
    }
}

fn log_storage_failure(path: &str, e: &StorageError) {
    let severity = e.severity().to_string();
    let mut fields = vec![
        ("path", path),
        ("code", e.code().code()),
        ("severity", severity.as_str()),
        ("error", e.message()),
    ];
    if let Some(details) = e.details() {
        fields.push(("details", details));
    }
    log_event_with_fields(Event::CatalogLoadFailed, &fields);
}

/// Run the interactive menu on stdin/stdout
pub fn menu(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;

    let prompt = Prompt::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::open(config.book_file(), config.save_on_exit, prompt)?;
    session.run()
}

/// Print every book as a JSON response
pub fn list<W: Write>(config_path: &Path, out: &mut W) -> CliResult<()> {
    let config = boot(config_path)?;
    let catalog = load_catalog(&config.book_file())?;

    write_response(out, serde_json::to_value(catalog.list())?)
}

/// Print the books whose title contains `keyword` as a JSON response
pub fn search<W: Write>(config_path: &Path, keyword: &str, out: &mut W) -> CliResult<()> {
    if keyword.is_empty() {
        return Err(CliError::invalid_argument("Search term is empty"));
    }

    let config = boot(config_path)?;
    let catalog = load_catalog(&config.book_file())?;

    let matches: Vec<&Book> = catalog.search_by_title(keyword).collect();
    write_response(out, serde_json::to_value(matches)?)
}
