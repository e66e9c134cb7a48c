//! CLI-specific error types

use std::fmt;
use std::io;

use crate::storage::StorageError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Catalog could not be loaded at startup
    BootFailed,
    /// Input ended while a prompt was waiting
    EndOfInput,
    /// Argument rejected before reaching the catalog
    InvalidArgument,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SHELF_CLI_CONFIG_ERROR",
            Self::IoError => "SHELF_CLI_IO_ERROR",
            Self::BootFailed => "SHELF_CLI_BOOT_FAILED",
            Self::EndOfInput => "SHELF_CLI_END_OF_INPUT",
            Self::InvalidArgument => "SHELF_CLI_INVALID_ARGUMENT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Input exhausted
    pub fn end_of_input() -> Self {
        Self::new(CliErrorCode::EndOfInput, "Input ended")
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_end_of_input(&self) -> bool {
        self.code == CliErrorCode::EndOfInput
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        if e.is_fatal() {
            Self::boot_failed(format!("Library data file is corrupt: {}", e))
        } else {
            Self::boot_failed(format!("Failed to load library data: {}", e))
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_code_and_message() {
        let err = CliError::config_error("bad json");
        assert_eq!(err.to_string(), "SHELF_CLI_CONFIG_ERROR: bad json");
    }

    #[test]
    fn test_end_of_input() {
        assert!(CliError::end_of_input().is_end_of_input());
        assert!(!CliError::io_error("x").is_end_of_input());
    }

    #[test]
    fn test_storage_error_becomes_boot_failure() {
        let err: CliError = StorageError::data_corruption("size mismatch").into();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert!(err.message().contains("SHELF_DATA_CORRUPTION"));
        assert!(err.message().starts_with("Library data file is corrupt"));
    }
}
