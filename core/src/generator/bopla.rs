//! # BOPLA / Mass Assignment
//!
//! Flattens declared response schemas into synthetic body parameters and
//! appends them to the existing body parameter set (spec.md §4.3).

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::fuzzer::fuzz_params;
use crate::model::{NormalizedSpec, ParamLocation, ParamType, ParameterRecord, ResponseEntry};
use crate::generator::util::{fuzz_components, get_unique_params, join_uri_path, substitute_path};
use indexmap::IndexMap;

const DEFAULT_SUCCESS_CODES: [u16; 3] = [200, 201, 301];

fn inject_response_params(response_params: &IndexMap<String, ResponseEntry>, is_v3: bool) -> Vec<ParameterRecord> {
    let mut params = Vec::new();

    for (status_code, entry) in response_params {
        let Some(properties) = entry
            .schema
            .as_ref()
            .and_then(|s| s.get("properties"))
            .and_then(|p| p.as_object())
        else {
            continue;
        };

        for (name, property_schema) in properties {
            let mut record = ParameterRecord::new(name.clone(), ParamLocation::Body, ParamType::from_schema(property_schema));
            record.status_code = Some(status_code.clone());
            params.push(record);
        }
    }

    fuzz_params(&params, is_v3)
}

/// Restricted to endpoints declaring at least one body or query parameter.
/// Each `(status, schema.properties)` pair becomes synthetic body
/// parameters appended to the existing body parameter set.
pub fn generate(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    let mut descriptors = Vec::new();

    for endpoint in &spec.endpoints {
        let components = fuzz_components(endpoint, spec.is_v3);
        if components.body_params.is_empty() && components.query_params.is_empty() {
            continue;
        }

        let path_params = get_unique_params(&components.path_params_in_body, &components.path_params_fuzzed);
        let endpoint_path = substitute_path(&endpoint.path, &path_params);

        let response_body_params = inject_response_params(&endpoint.response_params, spec.is_v3);
        let mut body_params = components.body_params;
        body_params.extend(response_body_params.clone());

        descriptors.push(TestDescriptor {
            test_name: "BOPLA Test".into(),
            url: join_uri_path(&[&spec.base_url, &spec.api_base_path, &endpoint_path]),
            endpoint: join_uri_path(&[&spec.api_base_path, &endpoint_path]),
            method: endpoint.http_method.as_upper().to_string(),
            body_params,
            query_params: components.query_params,
            path_params,
            malicious_payload: MaliciousPayload::Params(response_body_params),
            response_filter: ResponseFilter::StatusCodeFilter,
            vuln_details: VulnDetails::new(
                "Endpoint might be vulnerable to BOPLA",
                "Endpoint might not vulnerable to BOPLA",
            ),
            success_codes: Some(DEFAULT_SUCCESS_CODES.to_vec()),
            response_match_regex: None,
            options: ExecutionOptions::default(),
        });
    }

    descriptors
}
