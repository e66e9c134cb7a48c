//! shelf CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`, printing any error
//! to stderr and exiting non-zero on failure. All other work is delegated
//! to the CLI module.

use shelf::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
