//! Where a scanned QR code sends its visitor.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

/// Destination kind of a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectType {
    /// The hosted link-list page at `/q/{short_code}`.
    #[default]
    Links,
    /// A single external URL.
    Url,
}

impl RedirectType {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "links" => Ok(Self::Links),
            "url" => Ok(Self::Url),
            other => Err(CoreError::Validation(format!(
                "Invalid redirect type '{other}'. Must be one of: links, url"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Links => "links",
            Self::Url => "url",
        }
    }
}

/// Validate a destination update and return the URL to store.
///
/// A `url` destination needs an absolute http(s) URL. A `links`
/// destination clears any stored URL.
pub fn validate_destination(
    redirect_type: RedirectType,
    redirect_url: Option<&str>,
) -> Result<Option<String>, CoreError> {
    match redirect_type {
        RedirectType::Links => Ok(None),
        RedirectType::Url => {
            let raw = redirect_url
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    CoreError::Validation("redirect_url is required for url redirects".into())
                })?;
            validate_http_url(raw, "redirect_url").map(Some)
        }
    }
}

/// Check that `raw` is an absolute http or https URL.
pub fn validate_http_url(raw: &str, field: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(raw)
        .map_err(|e| CoreError::Validation(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::Validation(format!(
            "{field} must use http or https"
        )));
    }
    Ok(raw.to_string())
}

/// Path of the hosted link-list page for `short_code`.
pub fn links_page_path(short_code: &str) -> String {
    format!("/q/{short_code}")
}
