//! # Schema Reference Resolution
//!
//! Resolves a local `$ref` JSON Pointer against the document root
//! (spec.md §4.1). Deliberately non-recursive: a resolved schema is used
//! as-is, never re-scanned for nested `$ref`s. Depth greater than three
//! segments (excluding the leading `#`) is refused and logged, returning an
//! empty schema, per spec.md §7 ("Recoverable at parse time").

use serde_json::{json, Value as JsonValue};

/// Resolves `$ref: "#/a/b/c"` by descending `document["a"]["b"]["c"]`.
///
/// Returns an empty object for refs deeper than three segments, or for any
/// segment that fails to resolve to a value in `document`.
pub fn resolve_ref(document: &JsonValue, ref_path: &str) -> JsonValue {
    let segments: Vec<&str> = ref_path.trim_start_matches('#').split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() > 3 {
        tracing::error!(
            ref_path,
            "Schema spec $ref path should not be greater than 3 (excluding #)"
        );
        return json!({});
    }

    let mut cursor = document;
    for segment in &segments {
        match cursor.get(segment) {
            Some(next) => cursor = next,
            None => return json!({}),
        }
    }

    cursor.clone()
}

/// Resolves the `schema` of a parameter-like object: if it holds a `$ref`,
/// replaces it with the resolved target; otherwise returns it unchanged.
/// Mirrors OFFAT's `_get_param_definition_schema`.
pub fn resolve_schema_ref(document: &JsonValue, schema: Option<&JsonValue>) -> Option<JsonValue> {
    let schema = schema?;
    match schema.get("$ref").and_then(JsonValue::as_str) {
        Some(ref_path) => Some(resolve_ref(document, ref_path)),
        None => Some(schema.clone()),
    }
}
