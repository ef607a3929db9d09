//! # Test Plan Generator
//!
//! One sub-module per vulnerability class (spec.md §4.3), sharing the
//! helpers in `util`.

pub mod bola;
pub mod bopla;
pub mod injection;
pub mod missing_auth;
pub mod overlay;
pub mod sqli;
pub mod unsupported_method;
pub mod util;

use crate::descriptor::TestDescriptor;
use crate::model::NormalizedSpec;
use indexmap::IndexMap;

/// One generator operation, selectable by name from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VulnClass {
    /// Unsupported HTTP Method Check.
    UnsupportedMethod,
    /// SQLi in body/query parameters.
    SqliBodyQuery,
    /// SQLi in URI path segments.
    SqliUriPath,
    /// BOLA via path parameter substitution.
    BolaPath,
    /// BOLA via trailing-slash adjacent-id probing.
    BolaTrailingSlash,
    /// BOPLA / mass assignment.
    Bopla,
    /// OS command injection.
    OsCommandInjection,
    /// XSS / HTML injection.
    XssHtmlInjection,
    /// Server-side template injection.
    Ssti,
    /// Missing authentication enforcement.
    MissingAuth,
}

impl VulnClass {
    /// Every recognized vulnerability class, in a stable, documented order.
    pub const ALL: [VulnClass; 10] = [
        VulnClass::UnsupportedMethod,
        VulnClass::SqliBodyQuery,
        VulnClass::SqliUriPath,
        VulnClass::BolaPath,
        VulnClass::BolaTrailingSlash,
        VulnClass::Bopla,
        VulnClass::OsCommandInjection,
        VulnClass::XssHtmlInjection,
        VulnClass::Ssti,
        VulnClass::MissingAuth,
    ];

    /// Parses the CLI-facing kebab-case name for a vulnerability class.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "unsupported-method" => Some(VulnClass::UnsupportedMethod),
            "sqli-body-query" => Some(VulnClass::SqliBodyQuery),
            "sqli-uri-path" => Some(VulnClass::SqliUriPath),
            "bola-path" => Some(VulnClass::BolaPath),
            "bola-trailing-slash" => Some(VulnClass::BolaTrailingSlash),
            "bopla" => Some(VulnClass::Bopla),
            "os-command-injection" => Some(VulnClass::OsCommandInjection),
            "xss-html-injection" => Some(VulnClass::XssHtmlInjection),
            "ssti" => Some(VulnClass::Ssti),
            "missing-auth" => Some(VulnClass::MissingAuth),
            _ => None,
        }
    }

    /// Runs this vulnerability class's generator operation over `spec`.
    /// `headers`, if present, is only consulted by `MissingAuth`.
    pub fn run(self, spec: &NormalizedSpec, headers: Option<IndexMap<String, String>>) -> Vec<TestDescriptor> {
        match self {
            VulnClass::UnsupportedMethod => unsupported_method::generate(spec),
            VulnClass::SqliBodyQuery => sqli::generate_body_query(spec),
            VulnClass::SqliUriPath => sqli::generate_uri_path(spec),
            VulnClass::BolaPath => bola::generate_path(spec),
            VulnClass::BolaTrailingSlash => bola::generate_trailing_slash(spec),
            VulnClass::Bopla => bopla::generate(spec),
            VulnClass::OsCommandInjection => injection::os_command_injection(spec),
            VulnClass::XssHtmlInjection => injection::xss_html_injection(spec),
            VulnClass::Ssti => injection::ssti(spec),
            VulnClass::MissingAuth => missing_auth::generate(spec, headers),
        }
    }
}

/// Runs every requested vulnerability class (default: all) and concatenates
/// the resulting descriptors in `VulnClass::ALL` order.
pub fn generate_all(
    spec: &NormalizedSpec,
    classes: &[VulnClass],
    headers: Option<IndexMap<String, String>>,
) -> Vec<TestDescriptor> {
    classes
        .iter()
        .flat_map(|class| class.run(spec, headers.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    #[test]
    fn parses_every_all_variant_name_roundtrip() {
        let names = [
            "unsupported-method",
            "sqli-body-query",
            "sqli-uri-path",
            "bola-path",
            "bola-trailing-slash",
            "bopla",
            "os-command-injection",
            "xss-html-injection",
            "ssti",
            "missing-auth",
        ];
        for name in names {
            assert!(VulnClass::parse(name).is_some());
        }
        assert_eq!(VulnClass::ALL.len(), names.len());
    }

    #[test]
    fn generate_all_concatenates_every_class() {
        let doc = json!({
            "openapi": "3.0.0",
            "servers": [{"url": "http://h"}],
            "paths": {"/a": {"get": {"responses": {"200": {}}}}}
        });
        let spec = normalize(&doc).unwrap();
        let descriptors = generate_all(&spec, &VulnClass::ALL, None);
        // at minimum, unsupported-method (5 restricted verbs) and
        // trailing-slash (1) always fire for any endpoint.
        assert!(descriptors.len() >= 6);
    }
}
