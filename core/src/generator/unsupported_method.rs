//! # Unsupported HTTP Method Check
//!
//! Groups fuzzed endpoints by path and reports every verb in the checked
//! universe that the path does not document (spec.md §4.3).

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::generator::util::{fuzz_endpoint, join_uri_path};
use crate::model::{ParameterRecord, NormalizedSpec, CHECKED_VERB_UNIVERSE};
use indexmap::IndexMap;

const DEFAULT_SUCCESS_CODES: [u16; 4] = [200, 201, 301, 302];

struct EndpointGroup {
    url: String,
    endpoint: String,
    methods: Vec<&'static str>,
    body_params: Vec<ParameterRecord>,
    query_params: Vec<ParameterRecord>,
    path_params: Vec<ParameterRecord>,
}

/// Emits one descriptor per (path × restricted method), where a restricted
/// method is any of `CHECKED_VERB_UNIVERSE` the path does not document. Per
/// spec.md §9 Open Questions, the universe includes `patch` even though the
/// normalizer never parses a `patch` operation, so `patch` is always
/// reported as restricted.
///
/// Endpoints are grouped by the raw, unsubstituted path template, not by the
/// fuzzed/substituted path — each operation on the same path fuzzes its own
/// path parameters independently, so two methods on `/users/{id}` would
/// otherwise land in separate groups and each be reported as missing the
/// other's verb.
pub fn generate(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    let mut groups: IndexMap<String, EndpointGroup> = IndexMap::new();

    for endpoint in &spec.endpoints {
        let fuzzed = fuzz_endpoint(endpoint, spec);
        let template_key = join_uri_path(&[&spec.api_base_path, &endpoint.path]);
        let group = groups.entry(template_key).or_insert_with(|| EndpointGroup {
            url: fuzzed.url.clone(),
            endpoint: fuzzed.endpoint.clone(),
            methods: Vec::new(),
            body_params: Vec::new(),
            query_params: Vec::new(),
            path_params: Vec::new(),
        });

        if !group.methods.contains(&fuzzed.method) {
            group.methods.push(fuzzed.method);
        }
        group.body_params.extend(fuzzed.body_params);
        group.query_params.extend(fuzzed.query_params);
        group.path_params.extend(fuzzed.path_params);
    }

    let mut descriptors = Vec::new();
    for group in groups.into_values() {
        let restricted = CHECKED_VERB_UNIVERSE
            .iter()
            .filter(|verb| !group.methods.iter().any(|m| m.eq_ignore_ascii_case(verb)));

        for verb in restricted {
            descriptors.push(TestDescriptor {
                test_name: "UnSupported HTTP Method Check".into(),
                url: group.url.clone(),
                endpoint: group.endpoint.clone(),
                method: verb.to_ascii_uppercase(),
                body_params: group.body_params.clone(),
                query_params: group.query_params.clone(),
                path_params: group.path_params.clone(),
                malicious_payload: MaliciousPayload::None,
                response_filter: ResponseFilter::StatusCodeFilter,
                vuln_details: VulnDetails::new(
                    "Endpoint performs HTTP verb which is not documented",
                    "Endpoint doesn't perform any HTTP verb which is not documented",
                ),
                success_codes: Some(DEFAULT_SUCCESS_CODES.to_vec()),
                response_match_regex: None,
                options: ExecutionOptions::default(),
            });
        }
    }

    descriptors
}
