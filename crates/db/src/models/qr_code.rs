//! QR code models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use qrlanding_core::error::CoreError;
use qrlanding_core::logo::LogoShape;
use qrlanding_core::qr_style::VisualConfig;
use qrlanding_core::redirect::RedirectType;
use qrlanding_core::types::{DbId, Timestamp};

use crate::models::link::Link;

/// Title given to QR codes created without one.
pub const DEFAULT_TITLE: &str = "My QR Code";

/// A row from the `qr_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QrCode {
    pub id: DbId,
    pub tenant_id: DbId,
    pub short_code: String,
    pub title: String,
    pub redirect_type: String,
    pub redirect_url: Option<String>,
    pub logo_url: Option<String>,
    pub logo_shape: String,
    pub logo_size_percent: i32,
    pub corner_radius_level: i32,
    pub module_color: String,
    pub background_color: String,
    pub error_correction: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QrCode {
    /// The stored visual columns as a validated [`VisualConfig`].
    pub fn visual_config(&self) -> Result<VisualConfig, CoreError> {
        VisualConfig::from_parts(
            self.logo_size_percent,
            self.corner_radius_level,
            &self.module_color,
            &self.background_color,
            &self.error_correction,
        )
    }

    pub fn redirect_kind(&self) -> Result<RedirectType, CoreError> {
        RedirectType::from_name(&self.redirect_type)
    }

    pub fn logo_kind(&self) -> Result<LogoShape, CoreError> {
        LogoShape::from_name(&self.logo_shape)
    }
}

/// A QR code together with its ordered links.
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeWithLinks {
    #[serde(flatten)]
    pub qr_code: QrCode,
    pub links: Vec<Link>,
}

/// Request body for creating a QR code. The short code is always
/// generated server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQrCode {
    pub title: Option<String>,
}

/// Request body for changing where a QR code points.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDestination {
    pub redirect_type: String,
    pub redirect_url: Option<String>,
}
