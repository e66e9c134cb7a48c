//! CLI argument definitions using clap
//!
//! Commands:
//! - shelf [menu] --config <path>
//! - shelf list --config <path>
//! - shelf search <keyword> --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./shelf.json";

/// shelf - A single-user book inventory
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Print every book as JSON and exit
    List {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Print books whose title contains KEYWORD as JSON and exit
    Search {
        /// Case-sensitive title substring
        keyword: String,

        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Menu {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
