//! Error handling module for the glossa-cli host.
//!
//! This module provides a custom error type using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the glossa-cli application.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error when a required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when file operations fail.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The source file failed to lex or parse; diagnostics were already
    /// reported to the terminal by the caller.
    #[error("the program contains syntax errors")]
    Parse,

    /// The program ran but raised a runtime error.
    #[error(transparent)]
    Runtime(#[from] glossa_interp::RuntimeError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using CliError.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_file_operation_error_display() {
        let err = CliError::FileOperation("permission denied".to_string());
        assert_eq!(err.to_string(), "File operation failed: permission denied");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CliError::Validation("invalid format".to_string());
        assert_eq!(err.to_string(), "Validation error: invalid format");
    }

    #[test]
    fn test_parse_error_display() {
        let err = CliError::Parse;
        assert_eq!(err.to_string(), "the program contains syntax errors");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime_err = glossa_interp::RuntimeError::StopRequested;
        let cli_err: CliError = runtime_err.into();
        assert!(matches!(cli_err, CliError::Runtime(_)));
    }
}
