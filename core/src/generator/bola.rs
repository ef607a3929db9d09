//! # BOLA (Broken Object-Level Authorization)
//!
//! Path-parameter substitution and trailing-slash adjacent-id probing
//! (spec.md §4.3).

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::fuzzer::generate_random_int;
use crate::generator::util::{fuzz_components, fuzz_endpoint, get_unique_params, join_uri_path, substitute_path};
use crate::model::NormalizedSpec;

const DEFAULT_SUCCESS_CODES: [u16; 3] = [200, 201, 301];

/// Restricted to endpoints with a path parameter placeholder. Substitutes
/// fuzzer-generated values into the path and issues the documented verb.
pub fn generate_path(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    let mut descriptors = Vec::new();

    for endpoint in spec.endpoints.iter().filter(|e| e.path.contains("/{")) {
        let components = fuzz_components(endpoint, spec.is_v3);
        let path_params = get_unique_params(&components.path_params_in_body, &components.path_params_fuzzed);
        let endpoint_path = substitute_path(&endpoint.path, &path_params);

        descriptors.push(TestDescriptor {
            test_name: "BOLA Path Test with Fuzzed Params".into(),
            url: join_uri_path(&[&spec.base_url, &spec.api_base_path, &endpoint_path]),
            endpoint: join_uri_path(&[&spec.api_base_path, &endpoint_path]),
            method: endpoint.http_method.as_upper().to_string(),
            body_params: components.body_params,
            query_params: components.query_params,
            path_params: path_params.clone(),
            malicious_payload: MaliciousPayload::Params(path_params),
            response_filter: ResponseFilter::StatusCodeFilter,
            vuln_details: VulnDetails::new(
                "Endpoint might be vulnerable to BOLA",
                "Endpoint is not vulnerable to BOLA",
            ),
            success_codes: Some(DEFAULT_SUCCESS_CODES.to_vec()),
            response_match_regex: None,
            options: ExecutionOptions::default(),
        });
    }

    descriptors
}

/// For every endpoint, materializes the fuzzed URL and appends
/// `/<random integer>`, probing an adjacent object id.
pub fn generate_trailing_slash(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    spec.endpoints
        .iter()
        .map(|endpoint| {
            let fuzzed = fuzz_endpoint(endpoint, spec);
            let payload = generate_random_int();
            let url = if fuzzed.url.ends_with('/') {
                format!("{}{}", fuzzed.url, payload)
            } else {
                format!("{}/{}", fuzzed.url, payload)
            };

            TestDescriptor {
                test_name: "BOLA Path Trailing Slash Test".into(),
                url,
                endpoint: fuzzed.endpoint,
                method: fuzzed.method.to_string(),
                body_params: fuzzed.body_params,
                query_params: fuzzed.query_params,
                path_params: fuzzed.path_params,
                malicious_payload: MaliciousPayload::Scalar(payload.into()),
                response_filter: ResponseFilter::StatusCodeFilter,
                vuln_details: VulnDetails::new(
                    "Endpoint might be vulnerable to BOLA",
                    "Endpoint might not vulnerable to BOLA",
                ),
                success_codes: Some(DEFAULT_SUCCESS_CODES.to_vec()),
                response_match_regex: None,
                options: ExecutionOptions::default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {
                "/users/{id}": {
                    "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}],
                    "get": {"responses": {"200": {}}}
                },
                "/health": {"get": {"responses": {"200": {}}}}
            }
        })
    }

    #[test]
    fn bola_path_only_targets_path_parameterized_endpoints() {
        let spec = normalize(&sample()).unwrap();
        let descriptors = generate_path(&spec);
        assert_eq!(descriptors.len(), 1);
        assert!(!descriptors[0].url.contains("{id}"));
    }

    #[test]
    fn trailing_slash_covers_every_endpoint() {
        let spec = normalize(&sample()).unwrap();
        let descriptors = generate_trailing_slash(&spec);
        assert_eq!(descriptors.len(), 2);
        for d in &descriptors {
            assert!(d.url.rsplit('/').next().unwrap().parse::<i64>().is_ok());
        }
    }
}
