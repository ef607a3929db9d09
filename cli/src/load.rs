#![deny(missing_docs)]

//! # Spec File Loading
//!
//! Reads a spec file from disk and decodes it into the generic
//! `serde_json::Value` tree the core normalizer expects. YAML and JSON are
//! both accepted since OpenAPI/Swagger documents are commonly distributed in
//! either format — `serde_yaml::from_str::<serde_json::Value>` happily
//! accepts plain JSON too, since JSON is a subset of YAML.

use std::fs;
use std::path::Path;

use crate::error::CliResult;

/// Reads and decodes the spec file at `path`.
pub fn load_document(path: &Path) -> CliResult<serde_json::Value> {
    let content = fs::read_to_string(path)?;
    let value = serde_yaml::from_str(&content)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_yaml_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.yaml");
        fs::write(&path, "openapi: 3.0.0\nservers:\n  - url: http://h\npaths: {}\n").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc["openapi"], "3.0.0");
    }

    #[test]
    fn loads_json_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.json");
        fs::write(&path, r#"{"openapi": "3.0.0", "servers": [{"url": "http://h"}], "paths": {}}"#).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc["openapi"], "3.0.0");
    }

    #[test]
    fn missing_file_propagates_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        assert!(load_document(&path).is_err());
    }
}
