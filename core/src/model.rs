//! # Intermediate Representation
//!
//! The normalized, dialect-independent structures the Spec Normalizer
//! produces and every Test Plan Generator operation consumes. See spec.md
//! §3 for the authoritative field list; this module only adds Rust typing
//! (closed enums instead of stringly-typed fields, per spec.md §9).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// URL scheme of a declared server. Closed two-value enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plaintext HTTP.
    Http,
    /// TLS-wrapped HTTP.
    Https,
}

impl Scheme {
    /// The scheme's default port when none is present in the server URL.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// A server URL, parsed into its constituent parts (spec.md §3 "Server Descriptor").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// `http` or `https`.
    pub scheme: Scheme,
    /// Hostname, without port.
    pub host: String,
    /// Port number; defaulted per-scheme when absent from the URL.
    pub port: u16,
    /// Base path, may be empty. A leading slash is preserved when present.
    pub basepath: String,
}

/// Where a parameter is carried in the request. Closed six-value enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Synthesized from `requestBody.content`.
    Body,
    /// Query string parameter.
    Query,
    /// Path template placeholder.
    Path,
    /// HTTP header.
    Header,
    /// `multipart/form-data` / `application/x-www-form-urlencoded` field (Swagger v2).
    FormData,
    /// Cookie.
    Cookie,
}

/// The declared primitive type of a parameter or schema property.
///
/// Absent/unrecognized declarations normalize to `Unknown`, which the
/// fuzzer treats as `String` per spec.md §4.2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamType {
    /// `string`.
    String,
    /// `integer`.
    Integer,
    /// `number`.
    Number,
    /// `boolean`.
    Boolean,
    /// `array`, carrying its declared `items.type`.
    Array(Box<ParamType>),
    /// `object`, carrying declared `properties` name/type pairs.
    Object(Vec<(String, ParamType)>),
    /// Declaration absent or not one of the above.
    Unknown,
}

impl ParamType {
    /// Parses a declared OpenAPI/JSON-Schema `type` string plus, for
    /// `array`/`object`, the enclosing schema needed to recurse into
    /// `items`/`properties`. Anything unrecognized becomes `Unknown`.
    pub fn from_schema(schema: &JsonValue) -> Self {
        match schema.get("type").and_then(JsonValue::as_str) {
            Some("string") => ParamType::String,
            Some("integer") => ParamType::Integer,
            Some("number") => ParamType::Number,
            Some("boolean") => ParamType::Boolean,
            Some("array") => {
                let item_ty = schema
                    .get("items")
                    .map(ParamType::from_schema)
                    .unwrap_or(ParamType::Unknown);
                ParamType::Array(Box::new(item_ty))
            }
            Some("object") => {
                let props = schema
                    .get("properties")
                    .and_then(JsonValue::as_object)
                    .map(|map| {
                        map.iter()
                            .map(|(name, sub)| (name.clone(), ParamType::from_schema(sub)))
                            .collect()
                    })
                    .unwrap_or_default();
                ParamType::Object(props)
            }
            _ => ParamType::Unknown,
        }
    }
}

/// A single declared or synthesized parameter (spec.md §3 "Parameter Record").
///
/// Invariant: `name` is non-empty and `location` is one of the six closed
/// variants — enforced by construction, there is no "other" location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Parameter name.
    pub name: String,
    /// Location in the request.
    pub location: ParamLocation,
    /// Declared type.
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Human-readable description, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw resolved schema (populated for body parameters and v3 responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
    /// Fuzzed or injected value. `None` on a raw (unfuzzed) record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    /// Status code this parameter was flattened from, for BOPLA-synthesized
    /// body parameters (spec.md §4.3 "BOPLA / mass assignment").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
}

impl ParameterRecord {
    /// Builds a raw (unfuzzed) parameter record.
    pub fn new(name: impl Into<String>, location: ParamLocation, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            location,
            param_type,
            required: false,
            description: None,
            schema: None,
            value: None,
            status_code: None,
        }
    }
}

/// The HTTP verb of an operation. Closed five-value enumeration — spec.md
/// §3 explicitly limits parsing to these five; `patch`/`head`/`trace` are
/// never constructed here (see spec.md §9 Open Questions, kept as specified).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Parses a lowercase method name, returning `None` for anything outside
    /// the five methods the normalizer recognizes.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Uppercase verb string, as carried on `TestDescriptor::method`.
    pub fn as_upper(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Lowercase verb string, as declared in an OpenAPI path item.
    pub fn as_lower(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_upper())
    }
}

/// The verb universe the Unsupported HTTP Method Check enumerates
/// (spec.md §4.3), deliberately a superset of `HttpMethod` — it includes
/// `patch` even though the normalizer never parses a `patch` operation.
pub const CHECKED_VERB_UNIVERSE: [&str; 6] =
    ["get", "post", "put", "patch", "delete", "options"];

/// A resolved response entry for one declared status code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseEntry {
    /// Resolved schema for this status code, if any (spec.md §4.1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonValue>,
}

/// A single OpenAPI/Swagger security requirement object (AND-combined scheme
/// name → required scopes). Kept generic since only truthiness (is it
/// present, and is it not the pass-through `[{}]`) and scheme names matter
/// to the generators that consume it.
pub type SecurityRequirement = serde_json::Map<String, JsonValue>;

/// Returns true if `security` is non-empty and is not the pass-through
/// `[{}]` sentinel OpenAPI uses to mean "no authentication required".
pub fn has_meaningful_security(security: &[SecurityRequirement]) -> bool {
    if security.is_empty() {
        return false;
    }
    !(security.len() == 1 && security[0].is_empty())
}

/// One normalized (path, method) pair and its parameters (spec.md §3
/// "Endpoint Record").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Raw path template, e.g. `/users/{id}`.
    pub path: String,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Operation-declared parameters plus synthesized body parameters.
    pub request_params: Vec<ParameterRecord>,
    /// Parameters declared at the path-item level.
    pub path_params: Vec<ParameterRecord>,
    /// Synthesized `in = body` subset, one per request-body media type.
    pub body_params: Vec<ParameterRecord>,
    /// Status code string → resolved response entry.
    pub response_params: indexmap::IndexMap<String, ResponseEntry>,
    /// Security requirements declared on the operation.
    pub security: Vec<SecurityRequirement>,
}

/// The output of the Spec Normalizer: servers plus a flat endpoint list.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSpec {
    /// All declared servers; `servers[0]` is authoritative.
    pub servers: Vec<ServerDescriptor>,
    /// `scheme://host:port`, derived from the authoritative server.
    pub base_url: String,
    /// Base path derived from the authoritative server.
    pub api_base_path: String,
    /// Flattened (path, method) records.
    pub endpoints: Vec<EndpointRecord>,
    /// Whether the source document was OpenAPI v3 (`false` means Swagger v2).
    pub is_v3: bool,
    /// `components.securitySchemes` (v3) / `securityDefinitions` (v2), or
    /// empty if absent (logged at `warn`, spec.md §7).
    pub security_schemes: serde_json::Map<String, JsonValue>,
}
