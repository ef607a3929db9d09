//! # Shared Generator Helpers
//!
//! `join_uri_path`, `get_unique_params`, path-template substitution, and the
//! per-endpoint fuzzing step shared by several generator operations
//! (spec.md §4.3 step 1-6, §4.4).

use crate::fuzzer::fuzz_params;
use crate::model::{EndpointRecord, NormalizedSpec, ParamLocation, ParameterRecord};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Concatenates path segments with exactly one `/` between consecutive
/// non-empty parts. Preserves a leading `scheme://` in the first part and a
/// trailing `/` only if the last non-empty part explicitly carried one.
pub fn join_uri_path(parts: &[&str]) -> String {
    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            result.push_str(part.trim_end_matches('/'));
            continue;
        }
        let trimmed = part.trim_start_matches('/').trim_end_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        result.push('/');
        result.push_str(trimmed);
    }

    if let Some(last) = parts.iter().rev().find(|p| !p.is_empty()) {
        if last.ends_with('/') && !result.ends_with('/') {
            result.push('/');
        }
    }

    result
}

/// Union by `name`: every entry of `primary`, plus every entry of
/// `secondary` whose name doesn't already appear. Primary wins on collision;
/// primary's order is preserved, then secondary's non-duplicates are
/// appended in order (spec.md §4.4).
pub fn get_unique_params(primary: &[ParameterRecord], secondary: &[ParameterRecord]) -> Vec<ParameterRecord> {
    let mut seen: HashSet<String> = primary.iter().map(|p| p.name.clone()).collect();
    let mut result = primary.to_vec();
    for param in secondary {
        if seen.insert(param.name.clone()) {
            result.push(param.clone());
        }
    }
    result
}

fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Substitutes `{name}` in `path` with each parameter's fuzzed `value`.
/// Placeholders without a matching, filled parameter are left intact.
pub fn substitute_path(path: &str, params: &[ParameterRecord]) -> String {
    let mut result = path.to_string();
    for param in params {
        if let Some(value) = &param.value {
            result = result.replace(&format!("{{{}}}", param.name), &render_value(value));
        }
    }
    result
}

/// Substitutes `{name}` in `path` for every named parameter with a fixed
/// literal, regardless of that parameter's own fuzzed value. Used by the
/// URI-path SQLi operation, which probes the path segment itself rather
/// than the parameter's type-appropriate value.
pub fn substitute_path_literal(path: &str, params: &[ParameterRecord], literal: &str) -> String {
    let mut result = path.to_string();
    for param in params {
        result = result.replace(&format!("{{{}}}", param.name), literal);
    }
    result
}

/// The fuzzed, position-partitioned pieces of one endpoint's request
/// parameters, before path placeholders are substituted.
pub struct FuzzedComponents {
    /// `in = body` subset of the fuzzed `request_params`.
    pub body_params: Vec<ParameterRecord>,
    /// `in = query` subset of the fuzzed `request_params`.
    pub query_params: Vec<ParameterRecord>,
    /// `in = path` subset of the fuzzed `request_params` (as opposed to the
    /// path-item-level `path_params`).
    pub path_params_in_body: Vec<ParameterRecord>,
    /// The endpoint's `path_params` field, fuzzed independently.
    pub path_params_fuzzed: Vec<ParameterRecord>,
}

/// Fuzzes `endpoint.request_params` and `endpoint.path_params` and
/// partitions the former by location. Each generator then merges
/// `path_params_in_body`/`path_params_fuzzed` with its own
/// `get_unique_params` argument order (spec.md §9 Open Questions).
pub fn fuzz_components(endpoint: &EndpointRecord, is_v3: bool) -> FuzzedComponents {
    let request_params = fuzz_params(&endpoint.request_params, is_v3);

    let body_params = request_params
        .iter()
        .filter(|p| p.location == ParamLocation::Body)
        .cloned()
        .collect();
    let query_params = request_params
        .iter()
        .filter(|p| p.location == ParamLocation::Query)
        .cloned()
        .collect();
    let path_params_in_body = request_params
        .iter()
        .filter(|p| p.location == ParamLocation::Path)
        .cloned()
        .collect();

    let path_params_fuzzed = fuzz_params(&endpoint.path_params, is_v3);

    FuzzedComponents {
        body_params,
        query_params,
        path_params_in_body,
        path_params_fuzzed,
    }
}

/// A fully fuzzed, path-substituted endpoint, shared by the operations that
/// mirror the source implementation's `__fuzz_request_params` shape
/// (Unsupported Method Check, BOLA trailing-slash, SQLi body/query, and the
/// injection triad).
pub struct FuzzedEndpoint {
    /// Absolute materialized URL.
    pub url: String,
    /// Base-path-joined path.
    pub endpoint: String,
    /// Uppercase HTTP verb.
    pub method: &'static str,
    /// `in = body` parameters.
    pub body_params: Vec<ParameterRecord>,
    /// `in = query` parameters.
    pub query_params: Vec<ParameterRecord>,
    /// Merged, placeholder-substituted path parameters.
    pub path_params: Vec<ParameterRecord>,
    /// Declared security requirements.
    pub security: Vec<crate::model::SecurityRequirement>,
}

/// Fuzzes one endpoint using the `get_unique_params(path_params_fuzzed,
/// path_params_in_body)` merge order.
pub fn fuzz_endpoint(endpoint: &EndpointRecord, spec: &NormalizedSpec) -> FuzzedEndpoint {
    let components = fuzz_components(endpoint, spec.is_v3);
    let path_params = get_unique_params(&components.path_params_fuzzed, &components.path_params_in_body);
    let endpoint_path = substitute_path(&endpoint.path, &path_params);

    FuzzedEndpoint {
        url: join_uri_path(&[&spec.base_url, &spec.api_base_path, &endpoint_path]),
        endpoint: join_uri_path(&[&spec.api_base_path, &endpoint_path]),
        method: endpoint.http_method.as_upper(),
        body_params: components.body_params,
        query_params: components.query_params,
        path_params,
        security: endpoint.security.clone(),
    }
}
