//! # Injection Driver
//!
//! Shared driver for the three regex-matched injection families (OS
//! command, XSS/HTML, SSTI), parameterized by a `(test_name, vuln_details,
//! payloads)` triple, per spec.md §9's generator-family abstraction note.

use crate::descriptor::{ExecutionOptions, MaliciousPayload, ResponseFilter, TestDescriptor, VulnDetails};
use crate::generator::util::fuzz_endpoint;
use crate::model::{NormalizedSpec, ParamType, ParameterRecord};
use crate::payloads::{InjectionPayload, OS_COMMAND_PAYLOADS, SSTI_PAYLOADS, XSS_PAYLOADS};

fn inject(mut params: Vec<ParameterRecord>, payload: &str) -> Vec<ParameterRecord> {
    for param in &mut params {
        if param.param_type == ParamType::String {
            param.value = Some(serde_json::Value::String(payload.to_string()));
        }
    }
    params
}

/// Runs the shared injection driver: for each payload, injects it into
/// every string-typed body/query parameter of every endpoint that declares
/// at least one such parameter. Endpoints with neither are silently
/// skipped.
pub fn run(
    spec: &NormalizedSpec,
    test_name: &str,
    vuln_details: VulnDetails,
    payloads: &[InjectionPayload],
) -> Vec<TestDescriptor> {
    let mut descriptors = Vec::new();

    for payload in payloads {
        for endpoint in &spec.endpoints {
            let fuzzed = fuzz_endpoint(endpoint, spec);
            if fuzzed.body_params.is_empty() && fuzzed.query_params.is_empty() {
                continue;
            }

            descriptors.push(TestDescriptor {
                test_name: test_name.to_string(),
                url: fuzzed.url,
                endpoint: fuzzed.endpoint,
                method: fuzzed.method.to_string(),
                body_params: inject(fuzzed.body_params, payload.request_payload),
                query_params: inject(fuzzed.query_params, payload.request_payload),
                path_params: fuzzed.path_params,
                malicious_payload: MaliciousPayload::Scalar(payload.request_payload.into()),
                response_filter: ResponseFilter::BodyRegexFilter,
                vuln_details: vuln_details.clone(),
                success_codes: None,
                response_match_regex: Some(payload.response_match_regex.to_string()),
                options: ExecutionOptions::default(),
            });
        }
    }

    descriptors
}

/// OS command injection test generator.
pub fn os_command_injection(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    run(
        spec,
        "OS Command Injection Test",
        VulnDetails::new(
            "One or more parameter is vulnerable to OS Command Injection Attack",
            "Parameters are not vulnerable to OS Command Injection",
        ),
        &OS_COMMAND_PAYLOADS,
    )
}

/// XSS / HTML injection test generator.
pub fn xss_html_injection(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    run(
        spec,
        "XSS/HTML Injection Test",
        VulnDetails::new(
            "One or more parameter is vulnerable to XSS/HTML Injection Attack",
            "Parameters are not vulnerable to XSS/HTML Injection Attack",
        ),
        &XSS_PAYLOADS,
    )
}

/// Server-side template injection test generator.
pub fn ssti(spec: &NormalizedSpec) -> Vec<TestDescriptor> {
    run(
        spec,
        "SSTI Test",
        VulnDetails::new(
            "One or more parameter is vulnerable to SSTI Attack",
            "Parameters are not vulnerable to SSTI Attack",
        ),
        &SSTI_PAYLOADS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    // S3: path `/` with `post` accepting a body parameter `q: string`.
    #[test]
    fn s3_os_command_injection_emits_three_descriptors() {
        let doc = json!({
            "swagger": "2.0",
            "host": "h",
            "paths": {
                "/": {
                    "post": {
                        "parameters": [{"name": "q", "in": "body", "schema": {"type": "string"}}],
                        "responses": {"200": {}}
                    }
                }
            }
        });
        let spec = normalize(&doc).unwrap();
        let descriptors = os_command_injection(&spec);

        assert_eq!(descriptors.len(), 3);
        for d in &descriptors {
            assert_eq!(d.response_filter, ResponseFilter::BodyRegexFilter);
            assert!(d.response_match_regex.is_some());
            let q = d.body_params.iter().find(|p| p.name == "q").unwrap();
            let MaliciousPayload::Scalar(serde_json::Value::String(payload)) = &d.malicious_payload else {
                panic!("expected scalar payload");
            };
            assert_eq!(q.value, Some(serde_json::Value::String(payload.clone())));
        }
    }

    // S4: path `/a` with `get` and no parameters: zero descriptors.
    #[test]
    fn s4_no_params_yields_no_injection_descriptors() {
        let doc = json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {"/a": {"get": {"responses": {"200": {}}}}}
        });
        let spec = normalize(&doc).unwrap();
        assert!(os_command_injection(&spec).is_empty());
        assert!(xss_html_injection(&spec).is_empty());
        assert!(ssti(&spec).is_empty());
    }
}
