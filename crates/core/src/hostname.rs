//! Hostname normalization for domain registration and tenant resolution.
//!
//! Domains are stored in normalized form and looked up by exact match, so
//! both sides of the comparison go through [`normalize`].

use url::Url;

use crate::error::CoreError;

/// Host used when the input is empty or cannot be interpreted.
pub const FALLBACK_HOST: &str = "localhost:3000";

/// Normalize a raw host, URL, or `Host` header value.
///
/// Strict URL parsing is tried first and yields `host[:port]` (the port
/// only when it is not the scheme default). Otherwise a leading `http://`
/// or `https://` and one trailing `/` are stripped. The result is
/// lower-cased; empty results fall back to [`FALLBACK_HOST`].
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return FALLBACK_HOST.to_string();
    }

    if let Some(host) = parse_strict(raw) {
        return host;
    }

    let stripped = strip_loose(&raw.to_ascii_lowercase());
    if stripped.is_empty() {
        FALLBACK_HOST.to_string()
    } else {
        stripped
    }
}

/// Normalize a hostname submitted for registration and reject anything
/// that is not a bare host.
pub fn normalize_for_registration(raw: &str) -> Result<String, CoreError> {
    let hostname = strip_loose(&raw.trim().to_ascii_lowercase());

    if hostname.is_empty() {
        return Err(CoreError::Validation("hostname is required".into()));
    }
    if hostname.contains('/') || hostname.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Invalid hostname '{hostname}'"
        )));
    }
    Ok(hostname)
}

fn parse_strict(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str().filter(|h| !h.is_empty())?.to_ascii_lowercase();
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

fn strip_loose(raw: &str) -> String {
    let without_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn full_url_reduces_to_host() {
        assert_eq!(normalize("https://Links.Example.com/some/path"), "links.example.com");
        assert_eq!(normalize("http://example.com:8080/"), "example.com:8080");
    }

    #[test]
    fn default_port_is_dropped() {
        assert_eq!(normalize("https://example.com:443"), "example.com");
    }

    #[test]
    fn bare_host_passes_through_lower_cased() {
        assert_eq!(normalize("Example.COM"), "example.com");
        assert_eq!(normalize("example.com/"), "example.com");
    }

    #[test]
    fn host_header_with_port_is_kept() {
        // Parses as a URL with scheme "localhost", so the loose path applies.
        assert_eq!(normalize("localhost:3000"), "localhost:3000");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(normalize(""), FALLBACK_HOST);
        assert_eq!(normalize("   "), FALLBACK_HOST);
        assert_eq!(normalize("https://"), FALLBACK_HOST);
    }

    #[test]
    fn registration_strips_scheme_and_slash() {
        assert_eq!(
            normalize_for_registration("  HTTPS://Go.Example.com/ ").unwrap(),
            "go.example.com"
        );
    }

    #[test]
    fn registration_rejects_paths_and_spaces() {
        assert_matches!(
            normalize_for_registration("example.com/path"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            normalize_for_registration("exa mple.com"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(normalize_for_registration("https://"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn registration_and_resolution_agree() {
        let registered = normalize_for_registration("Shop.Example.com").unwrap();
        assert_eq!(normalize("shop.example.com"), registered);
        assert_eq!(normalize("https://shop.example.com/"), registered);
    }
}
