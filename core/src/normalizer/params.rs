//! # Parameter & Response Resolution
//!
//! Builds `ParameterRecord`s from an operation's declared `parameters`,
//! synthesizes body parameters from `requestBody.content`, and resolves
//! response schemas (spec.md §4.1 "Parameter resolution").

use crate::model::{ParamLocation, ParamType, ParameterRecord, ResponseEntry};
use crate::normalizer::refs::resolve_schema_ref;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

fn parse_location(in_value: &str) -> ParamLocation {
    match in_value {
        "body" => ParamLocation::Body,
        "path" => ParamLocation::Path,
        "header" => ParamLocation::Header,
        "formData" => ParamLocation::FormData,
        "cookie" => ParamLocation::Cookie,
        // Unrecognized locations default to query, matching the permissive
        // fallback the source tool applies when `in` is absent/unexpected.
        _ => ParamLocation::Query,
    }
}

/// Resolves a parameter-like object's declared type, preferring a `schema`
/// (OAS v3, and OAS v2 body parameters) and falling back to a top-level
/// `type` (OAS v2 non-body parameters).
fn resolve_param_type(param_obj: &JsonValue, document: &JsonValue) -> (ParamType, Option<JsonValue>) {
    if let Some(schema) = resolve_schema_ref(document, param_obj.get("schema")) {
        let ty = ParamType::from_schema(&schema);
        return (ty, Some(schema));
    }

    if let Some(type_str) = param_obj.get("type").and_then(JsonValue::as_str) {
        let synthetic_schema = serde_json::json!({"type": type_str});
        return (ParamType::from_schema(&synthetic_schema), None);
    }

    (ParamType::Unknown, None)
}

/// Converts a single raw parameter object into a `ParameterRecord`.
pub fn parse_parameter(param_obj: &JsonValue, document: &JsonValue) -> Option<ParameterRecord> {
    let name = param_obj.get("name").and_then(JsonValue::as_str)?.to_string();
    let location = parse_location(param_obj.get("in").and_then(JsonValue::as_str).unwrap_or(""));
    let (param_type, schema) = resolve_param_type(param_obj, document);

    Some(ParameterRecord {
        name,
        location,
        param_type,
        required: param_obj.get("required").and_then(JsonValue::as_bool).unwrap_or(false),
        description: param_obj
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from),
        schema,
        value: None,
        status_code: None,
    })
}

/// Resolves a `parameters` array (operation-level or path-item-level) into
/// `ParameterRecord`s, skipping any entry missing a `name`.
pub fn resolve_parameter_array(params: Option<&Vec<JsonValue>>, document: &JsonValue) -> Vec<ParameterRecord> {
    params
        .into_iter()
        .flatten()
        .filter_map(|p| parse_parameter(p, document))
        .collect()
}

/// Synthesizes one `in = body` Parameter Record per `requestBody.content`
/// media type (OAS v3). Returns an empty vec when `requestBody` is absent,
/// which is also the correct behavior for Swagger v2 documents (v2 body
/// parameters arrive instead through the ordinary `parameters` array with
/// `in: body`).
pub fn synthesize_body_params(operation: &JsonValue, document: &JsonValue) -> Vec<ParameterRecord> {
    let Some(request_body) = operation.get("requestBody") else {
        return Vec::new();
    };

    let required = request_body.get("required").and_then(JsonValue::as_bool).unwrap_or(false);
    let description = request_body
        .get("description")
        .and_then(JsonValue::as_str)
        .map(String::from);

    let Some(content) = request_body.get("content").and_then(JsonValue::as_object) else {
        return Vec::new();
    };

    content
        .iter()
        .map(|(media_type, media_entry)| {
            let schema = resolve_schema_ref(document, media_entry.get("schema"));
            let param_type = schema
                .as_ref()
                .map(ParamType::from_schema)
                .unwrap_or(ParamType::Unknown);
            ParameterRecord {
                name: media_type.clone(),
                location: ParamLocation::Body,
                param_type,
                required,
                description: description.clone(),
                schema,
                value: None,
                status_code: None,
            }
        })
        .collect()
}

/// Resolves the `responses` object of an operation into status-code-keyed
/// `ResponseEntry`s, per spec.md §4.1 "response schemas".
pub fn resolve_responses(operation: &JsonValue, document: &JsonValue) -> IndexMap<String, ResponseEntry> {
    let mut result = IndexMap::new();

    let Some(responses) = operation.get("responses").and_then(JsonValue::as_object) else {
        return result;
    };

    for (status, response_obj) in responses {
        let mut entry = ResponseEntry::default();

        if let Some(content) = response_obj.get("content").and_then(JsonValue::as_object) {
            for media_entry in content.values() {
                if let Some(params) = media_entry.get("parameters") {
                    entry.schema = Some(params.clone());
                } else if let Some(schema) = resolve_schema_ref(document, media_entry.get("schema")) {
                    entry.schema = Some(schema);
                }
            }
        } else if let Some(ref_path) = response_obj.get("$ref").and_then(JsonValue::as_str) {
            entry.schema = Some(crate::normalizer::refs::resolve_ref(document, ref_path));
        }

        result.insert(status.clone(), entry);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_v3_query_parameter() {
        let document = json!({});
        let param = json!({"name": "q", "in": "query", "schema": {"type": "string"}});
        let record = parse_parameter(&param, &document).unwrap();
        assert_eq!(record.name, "q");
        assert_eq!(record.location, ParamLocation::Query);
        assert_eq!(record.param_type, ParamType::String);
    }

    #[test]
    fn parses_v2_top_level_type() {
        let document = json!({});
        let param = json!({"name": "limit", "in": "query", "type": "integer"});
        let record = parse_parameter(&param, &document).unwrap();
        assert_eq!(record.param_type, ParamType::Integer);
    }

    #[test]
    fn synthesizes_body_param_per_media_type() {
        let document = json!({});
        let operation = json!({
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {"schema": {"type": "object", "properties": {}}}
                }
            }
        });
        let body_params = synthesize_body_params(&operation, &document);
        assert_eq!(body_params.len(), 1);
        assert_eq!(body_params[0].name, "application/json");
        assert_eq!(body_params[0].location, ParamLocation::Body);
        assert!(body_params[0].required);
    }

    #[test]
    fn resolves_response_schema_via_content() {
        let document = json!({});
        let operation = json!({
            "responses": {
                "200": {"content": {"application/json": {"schema": {"type": "object"}}}}
            }
        });
        let responses = resolve_responses(&operation, &document);
        assert_eq!(
            responses.get("200").unwrap().schema,
            Some(json!({"type": "object"}))
        );
    }

    #[test]
    fn resolves_response_ref_without_content() {
        let document = json!({"components": {"responses": {"NotFound": {"description": "nf"}}}});
        let operation = json!({
            "responses": {"404": {"$ref": "#/components/responses/NotFound"}}
        });
        let responses = resolve_responses(&operation, &document);
        assert_eq!(
            responses.get("404").unwrap().schema,
            Some(json!({"description": "nf"}))
        );
    }

    #[test]
    fn response_without_schema_resolves_empty_entry() {
        let document = json!({});
        let operation = json!({"responses": {"204": {"description": "no content"}}});
        let responses = resolve_responses(&operation, &document);
        assert_eq!(responses.get("204").unwrap().schema, None);
    }
}
