//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The global error enum for spec normalization and test-plan generation.
///
/// We use `derive_more` for boilerplate. Only the conditions spec.md §7
/// classifies as "Fatal at parse time" are represented here — recoverable
/// conditions never produce an `Err`, they degrade and log (see
/// `tracing::warn!`/`tracing::error!` call sites in `normalizer`).
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors, surfaced by the CLI's file loading.
    /// The core library itself never performs I/O.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document failed a fatal normalization precondition: unrecognized
    /// dialect, missing/empty `servers`, or no derivable host.
    #[from(ignore)]
    #[display("Invalid Spec: {_0}")]
    InvalidSpec(String),

    /// Generic errors not covered by a more specific variant.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion_defaults_to_general() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_invalid_spec_manual_creation() {
        let app_err = AppError::InvalidSpec("Server URLs Not Found".into());
        assert_eq!(format!("{}", app_err), "Invalid Spec: Server URLs Not Found");
    }
}
