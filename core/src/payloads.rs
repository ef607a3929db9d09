//! # Payload Catalogs
//!
//! Bit-exact injection payload/regex catalogs (spec.md §6), grounded on
//! `examples/original_source/OFFAT-dev/src/offat/tester/generator.py`'s
//! `basic_sqli_payloads`, `os_command_injection_fuzz_params_test`,
//! `xss_html_injection_fuzz_params_test`, and `ssti_fuzz_params_test`.

/// A request payload paired with the regex a positive finding must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPayload {
    /// The literal value injected into a string-typed parameter.
    pub request_payload: &'static str,
    /// Regex the response body must match for a positive finding.
    pub response_match_regex: &'static str,
}

/// The five canonical SQLi probes, injected verbatim into string-typed
/// body/query parameters or as a path-segment value.
pub const SQLI_PAYLOADS: [&str; 5] = [
    "' OR 1=1 ;--",
    "' UNION SELECT 1,2,3 -- -",
    "' OR '1'='1--",
    "' AND (SELECT * FROM (SELECT(SLEEP(5)))abc)",
    "' AND SLEEP(5) --",
];

const ROOT_REGEX: &str = r"root:.*";

/// OS command injection probes.
pub const OS_COMMAND_PAYLOADS: [InjectionPayload; 3] = [
    InjectionPayload {
        request_payload: "cat /etc/passwd",
        response_match_regex: ROOT_REGEX,
    },
    InjectionPayload {
        request_payload: "cat /etc/shadow",
        response_match_regex: ROOT_REGEX,
    },
    InjectionPayload {
        request_payload: "ls -la",
        response_match_regex: r"total\s\d+",
    },
];

/// Reflected XSS / HTML injection probes.
pub const XSS_PAYLOADS: [InjectionPayload; 3] = [
    InjectionPayload {
        request_payload: "<script>confirm(1)</script>",
        response_match_regex: r"<script[^>]*>.*</script>",
    },
    InjectionPayload {
        request_payload: "<script>alert(1)</script>",
        response_match_regex: r"<script[^>]*>.*</script>",
    },
    InjectionPayload {
        request_payload: "<img src=x onerror='javascript:confirm(1),>",
        response_match_regex: r"<img[^>]*>",
    },
];

/// Server-side template injection probes, spanning Jinja2, ERB, and OGNL
/// dialects.
pub const SSTI_PAYLOADS: [InjectionPayload; 9] = [
    InjectionPayload {
        request_payload: "${7777+99999}",
        response_match_regex: "107776",
    },
    InjectionPayload {
        request_payload: "{{7*'7'}}",
        response_match_regex: "49",
    },
    InjectionPayload {
        request_payload: "{{7*'7'}}",
        response_match_regex: "7777777",
    },
    InjectionPayload {
        request_payload: "{{ '<script>confirm(1337)</script>' }}",
        response_match_regex: "<script>confirm(1337)</script>",
    },
    InjectionPayload {
        request_payload: "{{ '<script>confirm(1337)</script>' | safe }}",
        response_match_regex: "<script>confirm(1337)</script>",
    },
    InjectionPayload {
        request_payload: "{{'owasp offat'.toUpperCase()}}",
        response_match_regex: "OWASP OFFAT",
    },
    InjectionPayload {
        request_payload: "{{'owasp offat' | upper }}",
        response_match_regex: "OWASP OFFAT",
    },
    InjectionPayload {
        request_payload: "<%= system('cat /etc/passwd') %>",
        response_match_regex: ROOT_REGEX,
    },
    InjectionPayload {
        request_payload: "*{7*7}",
        response_match_regex: "49",
    },
];

/// Header names the missing-auth generator strips from the executor-bound
/// passthrough.
pub const STRIPPED_AUTH_HEADERS: [&str; 2] = ["Authorization", "X-Api-Key"];
