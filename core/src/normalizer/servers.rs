//! # Server Extraction
//!
//! Parses declared server/host information into `ServerDescriptor`s
//! (spec.md §3, §4.1).

use crate::error::{AppError, AppResult};
use crate::model::{Scheme, ServerDescriptor};
use serde_json::Value as JsonValue;

/// Parses a single server URL into its constituent parts. Defaults the port
/// per scheme when absent, and treats `""` and `"/"` basepaths equivalently
/// (both normalize to `""`), per spec.md §4.4.
pub fn parse_server_url(url: &str) -> ServerDescriptor {
    let (scheme, rest) = if let Some(r) = url.strip_prefix("https://") {
        (Scheme::Https, r)
    } else if let Some(r) = url.strip_prefix("http://") {
        (Scheme::Http, r)
    } else {
        (Scheme::Http, url)
    };

    let (host_port, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };

    let (host, port) = match host_port.rsplit_once(':') {
        Some((h, p)) if !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) => {
            (h.to_string(), p.parse().unwrap_or_else(|_| scheme.default_port()))
        }
        _ => (host_port.to_string(), scheme.default_port()),
    };

    let basepath = if path.is_empty() || path == "/" {
        String::new()
    } else {
        path.to_string()
    };

    ServerDescriptor {
        scheme,
        host,
        port,
        basepath,
    }
}

/// Extracts the OpenAPI v3 `servers` block into descriptors.
///
/// Fails with `InvalidSpec("Server URLs Not Found")` if `servers` is absent
/// or empty. The first descriptor is authoritative for host/port/basepath;
/// its `scheme` is instead the aggregate rule from spec.md §3 — `https` if
/// any declared server URL uses `https`, otherwise `http`.
pub fn extract_servers_v3(document: &JsonValue) -> AppResult<Vec<ServerDescriptor>> {
    let servers = document
        .get("servers")
        .and_then(JsonValue::as_array)
        .filter(|arr| !arr.is_empty())
        .ok_or_else(|| {
            tracing::error!("Invalid Server Url: Server URLs are missing in spec file");
            AppError::InvalidSpec("Server URLs Not Found".into())
        })?;

    let mut descriptors = Vec::with_capacity(servers.len());
    let mut any_https = false;
    for server in servers {
        let url = server.get("url").and_then(JsonValue::as_str).unwrap_or("");
        if url.starts_with("https://") {
            any_https = true;
        }
        descriptors.push(parse_server_url(url));
    }

    if let Some(first) = descriptors.first_mut() {
        first.scheme = if any_https { Scheme::Https } else { Scheme::Http };
    }

    if descriptors[0].host.is_empty() {
        return Err(AppError::InvalidSpec("Invalid or missing host".into()));
    }

    Ok(descriptors)
}

/// Extracts Swagger v2 `host`/`basePath`/`schemes` into a single-element
/// descriptor list, producing the same shape as `extract_servers_v3`.
pub fn extract_servers_v2(document: &JsonValue) -> AppResult<Vec<ServerDescriptor>> {
    let host = document
        .get("host")
        .and_then(JsonValue::as_str)
        .unwrap_or("")
        .to_string();

    if host.is_empty() {
        return Err(AppError::InvalidSpec("Invalid or missing host".into()));
    }

    let basepath = document
        .get("basePath")
        .and_then(JsonValue::as_str)
        .filter(|p| *p != "/")
        .unwrap_or("")
        .to_string();

    let schemes: Vec<&str> = document
        .get("schemes")
        .and_then(JsonValue::as_array)
        .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default();

    let scheme = if schemes.iter().any(|s| *s == "https") {
        Scheme::Https
    } else {
        Scheme::Http
    };

    Ok(vec![ServerDescriptor {
        scheme,
        port: scheme.default_port(),
        host,
        basepath,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_server_url_defaults_port() {
        let d = parse_server_url("https://api.example.com/v1");
        assert_eq!(d.scheme, Scheme::Https);
        assert_eq!(d.host, "api.example.com");
        assert_eq!(d.port, 443);
        assert_eq!(d.basepath, "/v1");
    }

    #[test]
    fn parse_server_url_explicit_port() {
        let d = parse_server_url("https://api.example.com:8443/v1");
        assert_eq!(d.port, 8443);
        assert_eq!(d.host, "api.example.com");
    }

    #[test]
    fn parse_server_url_root_basepath_normalizes_empty() {
        let d = parse_server_url("http://example.com/");
        assert_eq!(d.basepath, "");
        let d2 = parse_server_url("http://example.com");
        assert_eq!(d2.basepath, "");
    }

    #[test]
    fn extract_servers_v3_missing_is_fatal() {
        let doc = json!({});
        let err = extract_servers_v3(&doc).unwrap_err();
        assert!(matches!(err, AppError::InvalidSpec(msg) if msg == "Server URLs Not Found"));
    }

    #[test]
    fn extract_servers_v3_aggregate_scheme_rule() {
        let doc = json!({
            "servers": [
                {"url": "http://a.example.com"},
                {"url": "https://b.example.com"}
            ]
        });
        let servers = extract_servers_v3(&doc).unwrap();
        assert_eq!(servers[0].scheme, Scheme::Https);
        assert_eq!(servers[0].host, "a.example.com");
    }

    #[test]
    fn extract_servers_v2_basic() {
        let doc = json!({"host": "api.example.com", "basePath": "/v2", "schemes": ["https"]});
        let servers = extract_servers_v2(&doc).unwrap();
        assert_eq!(servers[0].scheme, Scheme::Https);
        assert_eq!(servers[0].host, "api.example.com");
        assert_eq!(servers[0].basepath, "/v2");
    }
}
