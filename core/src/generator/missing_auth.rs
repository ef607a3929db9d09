//! # Missing Authentication Check
//!
//! Restricted to endpoints whose declared security is non-empty and not
//! the pass-through `[{}]` sentinel (spec.md §4.3).

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::generator::util::{fuzz_components, get_unique_params, join_uri_path, substitute_path};
use crate::model::{has_meaningful_security, NormalizedSpec};
use crate::payloads::STRIPPED_AUTH_HEADERS;
use indexmap::IndexMap;

const DEFAULT_SUCCESS_CODES: [u16; 3] = [200, 201, 301];

/// Emits one descriptor per endpoint with meaningful declared security,
/// with `Authorization`/`X-Api-Key` stripped from the executor-bound
/// passthrough headers regardless of what the caller supplied.
pub fn generate(spec: &NormalizedSpec, headers: Option<IndexMap<String, String>>) -> Vec<TestDescriptor> {
    let mut stripped = headers.unwrap_or_default();
    for header in STRIPPED_AUTH_HEADERS {
        stripped.shift_remove(header);
    }

    let mut descriptors = Vec::new();

    for endpoint in spec.endpoints.iter().filter(|e| has_meaningful_security(&e.security)) {
        let components = fuzz_components(endpoint, spec.is_v3);
        let path_params = get_unique_params(&components.path_params_in_body, &components.path_params_fuzzed);
        let endpoint_path = substitute_path(&endpoint.path, &path_params);

        descriptors.push(TestDescriptor {
            test_name: "Missing Authentication Test with Fuzzed Params".into(),
            url: join_uri_path(&[&spec.base_url, &spec.api_base_path, &endpoint_path]),
            endpoint: join_uri_path(&[&spec.api_base_path, &endpoint_path]),
            method: endpoint.http_method.as_upper().to_string(),
            body_params: components.body_params,
            query_params: components.query_params,
            path_params,
            malicious_payload: MaliciousPayload::Scalar("Security Payload Missing".into()),
            response_filter: ResponseFilter::StatusCodeFilter,
            vuln_details: VulnDetails::new(
                "Endpoint fails to implement security authentication as defined",
                "Endpoint implements security authentication as defined",
            ),
            success_codes: Some(DEFAULT_SUCCESS_CODES.to_vec()),
            response_match_regex: None,
            options: ExecutionOptions {
                headers: Some(stripped.clone()),
            },
        });
    }

    descriptors
}
