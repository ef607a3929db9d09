//! # Dialect Detection
//!
//! Distinguishes OpenAPI v3 from Swagger v2 documents (spec.md §4.1).

use crate::error::{AppError, AppResult};
use serde_json::Value as JsonValue;

/// Which specification dialect a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Top-level `openapi` string beginning with `3.`.
    OpenApiV3,
    /// Top-level `swagger` string beginning with `2.`.
    SwaggerV2,
}

/// Detects the dialect of a decoded document, failing with
/// `AppError::InvalidSpec` if neither discriminator is present.
pub fn detect_dialect(document: &JsonValue) -> AppResult<Dialect> {
    if let Some(version) = document.get("openapi").and_then(JsonValue::as_str) {
        if version.starts_with("3.") {
            return Ok(Dialect::OpenApiV3);
        }
    }

    if let Some(version) = document.get("swagger").and_then(JsonValue::as_str) {
        if version.starts_with("2.") {
            return Ok(Dialect::SwaggerV2);
        }
    }

    Err(AppError::InvalidSpec(
        "document declares neither a supported 'openapi' nor 'swagger' version".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_openapi_v3() {
        let doc = json!({"openapi": "3.0.1"});
        assert_eq!(detect_dialect(&doc).unwrap(), Dialect::OpenApiV3);
    }

    #[test]
    fn detects_swagger_v2() {
        let doc = json!({"swagger": "2.0"});
        assert_eq!(detect_dialect(&doc).unwrap(), Dialect::SwaggerV2);
    }

    #[test]
    fn rejects_unrecognized_document() {
        let doc = json!({"info": {"title": "x"}});
        let err = detect_dialect(&doc).unwrap_err();
        assert!(matches!(err, AppError::InvalidSpec(_)));
    }

    #[test]
    fn rejects_unsupported_version() {
        let doc = json!({"openapi": "2.9"});
        assert!(detect_dialect(&doc).is_err());
    }
}
