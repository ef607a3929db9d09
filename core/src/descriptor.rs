//! # Test Descriptor
//!
//! The terminal output of the Test Plan Generator (spec.md §3). Once
//! emitted, a `TestDescriptor` is never consumed by this crate again — only
//! by the external HTTP executor.

use crate::model::ParameterRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// How an executor decides whether a test finding is positive. A closed
/// two-value enumeration (spec.md §6 "Filter enumeration"), modeled as a
/// tagged variant per spec.md §9 rather than a stringly-typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseFilter {
    /// Positive iff the observed HTTP status is in `success_codes`.
    StatusCodeFilter,
    /// Positive iff the response body matches `response_match_regex`.
    BodyRegexFilter,
}

/// Typed replacement for the source implementation's opaque `args`/`kwargs`
/// passthrough (spec.md §9 "Passthrough args/kwargs"). The only field any
/// generator inspects is `headers`, and only the missing-auth generator
/// mutates it (stripping `Authorization`/`X-Api-Key`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOptions {
    /// Headers to send with the request, carried opaquely except for the
    /// missing-auth generator's stripping pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}

/// A human-facing explanation of what a boolean outcome means for this test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnDetails {
    /// Message shown when the response filter matched (vulnerability found).
    pub on_positive: String,
    /// Message shown when the response filter did not match.
    pub on_negative: String,
}

impl VulnDetails {
    /// Builds a `VulnDetails` from the (true, false) pair used throughout
    /// spec.md §4.3 and the source implementation's `vuln_details` dicts.
    pub fn new(on_positive: impl Into<String>, on_negative: impl Into<String>) -> Self {
        Self {
            on_positive: on_positive.into(),
            on_negative: on_negative.into(),
        }
    }
}

/// The malicious payload a test probes with. Most operations carry a single
/// scalar string; BOLA trailing-slash carries an integer; BOPLA carries the
/// synthesized body parameters it appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaliciousPayload {
    /// A single scalar payload (SQLi, OS command, XSS, SSTI, trailing-slash id).
    Scalar(JsonValue),
    /// A sequence of parameters, used by BOPLA and BOLA-path.
    Params(Vec<ParameterRecord>),
    /// No payload (Unsupported HTTP Method Check).
    None,
}

/// A fully materialized request-plus-evaluation-rule bundle (spec.md §3
/// "Test Descriptor"). Field presence is stable across every generator
/// operation: every descriptor carries the first ten fields, and exactly
/// one of `success_codes` / `response_match_regex` is meaningfully
/// populated, selected by `response_filter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDescriptor {
    /// Human-readable test name, e.g. `"SQLi Test"`.
    pub test_name: String,
    /// Fully materialized absolute URL.
    pub url: String,
    /// Base-path-joined path, for grouping descriptors by endpoint.
    pub endpoint: String,
    /// Uppercase HTTP verb.
    pub method: String,
    /// Body parameters, potentially carrying malicious values.
    pub body_params: Vec<ParameterRecord>,
    /// Query parameters, potentially carrying malicious values.
    pub query_params: Vec<ParameterRecord>,
    /// Path parameters, potentially carrying malicious values.
    pub path_params: Vec<ParameterRecord>,
    /// The payload being probed; opaque to the executor beyond logging.
    pub malicious_payload: MaliciousPayload,
    /// Which evaluation rule the executor applies.
    pub response_filter: ResponseFilter,
    /// What a positive/negative outcome means for this test.
    pub vuln_details: VulnDetails,
    /// Populated iff `response_filter == StatusCodeFilter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_codes: Option<Vec<u16>>,
    /// Populated iff `response_filter == BodyRegexFilter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_match_regex: Option<String>,
    /// Executor-bound passthrough options (headers).
    #[serde(default)]
    pub options: ExecutionOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_filter_is_exclusive_by_construction() {
        let status_descriptor = TestDescriptor {
            test_name: "x".into(),
            url: "http://h/x".into(),
            endpoint: "/x".into(),
            method: "GET".into(),
            body_params: vec![],
            query_params: vec![],
            path_params: vec![],
            malicious_payload: MaliciousPayload::None,
            response_filter: ResponseFilter::StatusCodeFilter,
            vuln_details: VulnDetails::new("pos", "neg"),
            success_codes: Some(vec![200]),
            response_match_regex: None,
            options: ExecutionOptions::default(),
        };
        assert!(status_descriptor.success_codes.is_some());
        assert!(status_descriptor.response_match_regex.is_none());
    }
}
