#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Spec normalization or test-plan generation failed.
    #[display("{_0}")]
    Core(apisec_core::AppError),

    /// The spec file's content is neither valid YAML nor valid JSON.
    #[display("Failed to parse spec file: {_0}")]
    Parse(serde_yaml::Error),

    /// Output serialization failed.
    #[display("Failed to serialize test plan: {_0}")]
    Serialize(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {_0}")]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn io_error_converts() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn core_error_converts_and_displays() {
        let core_err = apisec_core::AppError::InvalidSpec("Server URLs Not Found".into());
        let cli_err: CliError = core_err.into();
        assert_eq!(format!("{cli_err}"), "Invalid Spec: Server URLs Not Found");
    }

    #[test]
    fn general_error_displays_message() {
        let cli_err = CliError::General("boom".into());
        assert_eq!(format!("{cli_err}"), "Operation failed: boom");
    }
}
