//! Logo upload rules and object-path helpers.

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum accepted logo size (2 MiB).
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Accepted logo MIME types.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/svg+xml"];

/// Default bucket name for logo objects.
pub const DEFAULT_LOGO_BUCKET: &str = "qr-logos";

/// Shape of the embedded logo.
///
/// The excavated area under the logo is always square; `Circle` only
/// affects how the logo itself is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    #[default]
    Square,
    Circle,
}

impl LogoShape {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            other => Err(CoreError::Validation(format!(
                "Logo shape must be either square or circle, got '{other}'"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
        }
    }
}

/// Check an uploaded logo's declared type, size and content.
///
/// Raster uploads must sniff as the declared format so a renamed file
/// cannot slip past the type check. SVG has no magic number; it only
/// needs to look like markup.
pub fn validate_upload(content_type: &str, data: &[u8]) -> Result<(), CoreError> {
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Invalid file type '{content_type}'. Allowed: {ALLOWED_CONTENT_TYPES:?}"
        )));
    }
    if data.is_empty() {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if data.len() > MAX_LOGO_BYTES {
        return Err(CoreError::Validation(format!(
            "File too large: {} bytes (max {MAX_LOGO_BYTES})",
            data.len()
        )));
    }

    match content_type {
        "image/svg+xml" => {
            let head = String::from_utf8_lossy(&data[..data.len().min(512)]);
            if !head.trim_start().starts_with('<') {
                return Err(CoreError::Validation(
                    "File content does not look like SVG".into(),
                ));
            }
        }
        _ => {
            let expected = if content_type == "image/png" {
                ImageFormat::Png
            } else {
                ImageFormat::Jpeg
            };
            match image::guess_format(data) {
                Ok(found) if found == expected => {}
                _ => {
                    return Err(CoreError::Validation(format!(
                        "File content does not match declared type '{content_type}'"
                    )))
                }
            }
        }
    }

    Ok(())
}

/// File extension for an allowed content type.
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/svg+xml" => "svg",
        _ => "jpg",
    }
}

/// Object path for a new logo: `{tenant_id}/{qr_code_id}-{unix_millis}.{ext}`.
pub fn object_path(tenant_id: DbId, qr_code_id: DbId, unix_millis: i64, content_type: &str) -> String {
    format!(
        "{tenant_id}/{qr_code_id}-{unix_millis}.{}",
        extension_for(content_type)
    )
}

/// Recover the object path from a public URL by taking everything after
/// the `/{bucket}/` segment.
///
/// Returns `None` for URLs that do not point into `bucket`, so foreign
/// logo URLs are never deleted.
pub fn object_path_from_url(public_url: &str, bucket: &str) -> Option<String> {
    let without_query = public_url.split(['?', '#']).next().unwrap_or(public_url);
    let mut segments = without_query.split('/');
    segments.by_ref().find(|s| *s == bucket)?;
    let path = segments.collect::<Vec<_>>().join("/");
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
