#![deny(missing_docs)]

//! # Validate Command
//!
//! Runs only the Spec Normalizer and reports a summary, for quick spec
//! sanity-checking without generating a full test batch.

use std::path::PathBuf;

use apisec_core::normalize;

use crate::error::{CliError, CliResult};
use crate::load::load_document;

/// Arguments for the `validate` command.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the OpenAPI v3 / Swagger v2 spec file (YAML or JSON).
    #[clap(long)]
    pub spec: PathBuf,
}

/// Executes the `validate` command.
pub fn execute(args: &ValidateArgs) -> CliResult<()> {
    let document = load_document(&args.spec)?;
    let normalized = normalize(&document).map_err(CliError::Core)?;

    let dialect = if normalized.is_v3 { "OpenAPI v3" } else { "Swagger v2" };
    println!(
        "{dialect}: {} endpoint(s), base {}{}",
        normalized.endpoints.len(),
        normalized.base_url,
        normalized.api_base_path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn validates_minimal_spec() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        fs::write(
            &spec_path,
            r#"{"openapi": "3.0.0", "servers": [{"url": "http://h"}], "paths": {}}"#,
        )
        .unwrap();

        let args = ValidateArgs { spec: spec_path };
        execute(&args).unwrap();
    }

    #[test]
    fn reports_core_error_for_invalid_spec() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("spec.json");
        fs::write(&spec_path, r#"{"paths": {}}"#).unwrap();

        let args = ValidateArgs { spec: spec_path };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }
}
