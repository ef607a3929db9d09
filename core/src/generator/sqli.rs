//! # SQL Injection
//!
//! Body/query injection and URI-path injection (spec.md §4.3).

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::fuzzer::fuzz_params;
use crate::generator::util::{fuzz_components, fuzz_endpoint, join_uri_path, substitute_path_literal};
use crate::model::{NormalizedSpec, ParamType};
use crate::payloads::SQLI_PAYLOADS;

fn inject_sqli(mut params: Vec<crate::model::ParameterRecord>, payload: &str) -> Vec<crate::model::ParameterRecord> {
    for param in &mut params {
        if param.param_type == ParamType::String {
            param.value = Some(serde_json::Value::String(payload.to_string()));
        }
    }
    params
}

/// Injects each of the five SQLi payloads into every string-typed body and
/// query parameter. Path parameters are deliberately left untouched (spec.md
/// §9 Open Questions: kept as specified).
pub fn generate_body_query(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    let mut descriptors = Vec::new();

    for payload in SQLI_PAYLOADS {
        for endpoint in &spec.endpoints {
            let fuzzed = fuzz_endpoint(endpoint, spec);
            descriptors.push(TestDescriptor {
                test_name: "SQLi Test".into(),
                url: fuzzed.url,
                endpoint: fuzzed.endpoint,
                method: fuzzed.method.to_string(),
                body_params: inject_sqli(fuzzed.body_params, payload),
                query_params: inject_sqli(fuzzed.query_params, payload),
                path_params: fuzzed.path_params,
                malicious_payload: MaliciousPayload::Scalar(payload.into()),
                response_filter: ResponseFilter::StatusCodeFilter,
                vuln_details: VulnDetails::new(
                    "One or more parameter is vulnerable to SQL Injection Attack",
                    "Parameters are not vulnerable to SQLi Payload",
                ),
                success_codes: Some(vec![500]),
                response_match_regex: None,
                options: ExecutionOptions::default(),
            });
        }
    }

    descriptors
}

/// Restricted to endpoints whose raw path contains `/{`. Substitutes each
/// SQLi payload as the literal value of every path parameter, leaving query
/// and body parameters at their fuzzed values.
pub fn generate_uri_path(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    let mut descriptors = Vec::new();

    let endpoints_with_path_param: Vec<_> = spec.endpoints.iter().filter(|e| e.path.contains("/{")).collect();

    for payload in SQLI_PAYLOADS {
        for endpoint in &endpoints_with_path_param {
            let components = fuzz_components(endpoint, spec.is_v3);

            let mut combined = endpoint.path_params.clone();
            combined.extend(components.path_params_in_body.clone());
            let combined = fuzz_params(&combined, spec.is_v3);

            let endpoint_path = substitute_path_literal(&endpoint.path, &combined, payload);

            let url = join_uri_path(&[&spec.base_url, &spec.api_base_path, &endpoint_path]);
            let endpoint_str = join_uri_path(&[&spec.api_base_path, &endpoint_path]);

            descriptors.push(TestDescriptor {
                test_name: "SQLi Test in URI Path with Fuzzed Params".into(),
                url,
                endpoint: endpoint_str,
                method: endpoint.http_method.as_upper().to_string(),
                body_params: components.body_params,
                query_params: components.query_params,
                path_params: combined,
                malicious_payload: MaliciousPayload::Scalar(payload.into()),
                response_filter: ResponseFilter::StatusCodeFilter,
                vuln_details: VulnDetails::new(
                    "Endpoint might be vulnerable to SQli",
                    "Endpoint is not vulnerable to SQLi",
                ),
                success_codes: Some(vec![500]),
                response_match_regex: None,
                options: ExecutionOptions::default(),
            });
        }
    }

    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    #[test]
    fn body_query_injects_into_string_params_only() {
        let doc = json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {
                "/search": {
                    "get": {
                        "parameters": [
                            {"name": "q", "in": "query", "schema": {"type": "string"}},
                            {"name": "limit", "in": "query", "schema": {"type": "integer"}}
                        ],
                        "responses": {"200": {}}
                    }
                }
            }
        });
        let spec = normalize(&doc).unwrap();
        let descriptors = generate_body_query(&spec);
        assert_eq!(descriptors.len(), SQLI_PAYLOADS.len());

        let first = &descriptors[0];
        let q = first.query_params.iter().find(|p| p.name == "q").unwrap();
        assert_eq!(q.value, Some(serde_json::Value::String(SQLI_PAYLOADS[0].into())));
        let limit = first.query_params.iter().find(|p| p.name == "limit").unwrap();
        assert_ne!(limit.value, Some(serde_json::Value::String(SQLI_PAYLOADS[0].into())));
    }

    // S2: path `/items/{id}` with `get`, integer path parameter `id`.
    #[test]
    fn s2_uri_path_sqli_substitutes_every_payload() {
        let doc = json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {
                "/items/{id}": {
                    "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}, "required": true}],
                    "get": {"responses": {"200": {}}}
                }
            }
        });
        let spec = normalize(&doc).unwrap();
        let descriptors = generate_uri_path(&spec);
        assert_eq!(descriptors.len(), SQLI_PAYLOADS.len());
        for (descriptor, payload) in descriptors.iter().zip(SQLI_PAYLOADS.iter()) {
            assert!(descriptor.url.ends_with(*payload));
        }
    }

    #[test]
    fn no_path_placeholder_yields_no_uri_path_tests() {
        let doc = json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {"/items": {"get": {"responses": {"200": {}}}}}
        });
        let spec = normalize(&doc).unwrap();
        assert!(generate_uri_path(&spec).is_empty());
    }
}
