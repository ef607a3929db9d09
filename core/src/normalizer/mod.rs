//! # Spec Normalizer
//!
//! Turns a decoded OpenAPI v3 or Swagger v2 document into a `NormalizedSpec`
//! (spec.md §3, §4.1). This is the only place dialect matters; every
//! downstream generator operates purely on `NormalizedSpec`/`EndpointRecord`.

pub mod dialect;
pub mod params;
pub mod refs;
pub mod servers;

use crate::error::AppResult;
use crate::model::{
    EndpointRecord, HttpMethod, NormalizedSpec, ParamLocation, SecurityRequirement,
};
use dialect::Dialect;
use serde_json::Value as JsonValue;

fn security_requirements(value: Option<&JsonValue>) -> Vec<SecurityRequirement> {
    value
        .and_then(JsonValue::as_array)
        .map(|arr| arr.iter().filter_map(JsonValue::as_object).cloned().collect())
        .unwrap_or_default()
}

fn security_schemes(document: &JsonValue, is_v3: bool) -> serde_json::Map<String, JsonValue> {
    let schemes = if is_v3 {
        document
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
    } else {
        document.get("securityDefinitions")
    };

    match schemes.and_then(JsonValue::as_object) {
        Some(map) if !map.is_empty() => map.clone(),
        _ => {
            tracing::warn!("No security schemes/definitions declared in spec file");
            serde_json::Map::new()
        }
    }
}

fn build_endpoint(
    path: &str,
    http_method: HttpMethod,
    operation: &JsonValue,
    path_item_params: &[crate::model::ParameterRecord],
    document: &JsonValue,
) -> EndpointRecord {
    let operation_params = params::resolve_parameter_array(
        operation.get("parameters").and_then(JsonValue::as_array),
        document,
    );
    let synthesized_body = params::synthesize_body_params(operation, document);

    let mut request_params = operation_params;
    request_params.extend(synthesized_body);

    let body_params: Vec<_> = request_params
        .iter()
        .filter(|p| p.location == ParamLocation::Body)
        .cloned()
        .collect();

    let response_params = params::resolve_responses(operation, document);
    let security = security_requirements(operation.get("security"));

    EndpointRecord {
        path: path.to_string(),
        http_method,
        request_params,
        path_params: path_item_params.to_vec(),
        body_params,
        response_params,
        security,
    }
}

/// Normalizes a decoded document of either supported dialect into a flat,
/// dialect-independent `NormalizedSpec`.
pub fn normalize(document: &JsonValue) -> AppResult<NormalizedSpec> {
    let dialect = dialect::detect_dialect(document)?;
    let is_v3 = dialect == Dialect::OpenApiV3;

    let servers = if is_v3 {
        servers::extract_servers_v3(document)?
    } else {
        servers::extract_servers_v2(document)?
    };

    let authoritative = &servers[0];
    let base_url = format!(
        "{}://{}:{}",
        authoritative.scheme, authoritative.host, authoritative.port
    );
    let api_base_path = authoritative.basepath.clone();

    let mut endpoints = Vec::new();
    if let Some(paths) = document.get("paths").and_then(JsonValue::as_object) {
        for (path, path_item) in paths {
            let path_item_params = params::resolve_parameter_array(
                path_item.get("parameters").and_then(JsonValue::as_array),
                document,
            );

            for (method_str, operation) in path_item.as_object().into_iter().flatten() {
                let Some(http_method) = HttpMethod::parse(method_str) else {
                    continue;
                };
                endpoints.push(build_endpoint(
                    path,
                    http_method,
                    operation,
                    &path_item_params,
                    document,
                ));
            }
        }
    }

    Ok(NormalizedSpec {
        servers,
        base_url,
        api_base_path,
        endpoints,
        is_v3,
        security_schemes: security_schemes(document, is_v3),
    })
}
