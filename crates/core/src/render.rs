//! Parameters handed to the external QR renderer.
//!
//! Nothing here rasterizes; [`RenderOptions`] is the complete, already
//! validated description of one symbol at one pixel size.

use serde::Serialize;

use crate::color::HexColor;
use crate::error::CoreError;
use crate::logo::LogoShape;
use crate::qr_style::{ErrorCorrectionLevel, VisualConfig, RADIUS_PERCENT_PER_LEVEL};

/// Pixel sizes offered for export.
pub const EXPORT_SIZES: [u32; 4] = [256, 512, 1024, 2048];

pub const DEFAULT_EXPORT_SIZE: u32 = 1024;

/// URL encoded into the symbol: `https://{host}/q/{short_code}`.
pub fn target_url(host: &str, short_code: &str) -> String {
    format!("https://{host}/q/{short_code}")
}

/// Reject pixel sizes outside [`EXPORT_SIZES`].
pub fn validate_size(size_px: u32) -> Result<u32, CoreError> {
    if EXPORT_SIZES.contains(&size_px) {
        Ok(size_px)
    } else {
        Err(CoreError::Validation(format!(
            "size must be one of {EXPORT_SIZES:?}, got {size_px}"
        )))
    }
}

/// A stored logo to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSource {
    pub url: String,
    pub shape: LogoShape,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoPlacement {
    pub src: String,
    pub shape: LogoShape,
    pub width_px: f64,
    pub height_px: f64,
    /// Modules under the logo are cleared. The cleared area is square for
    /// both shapes.
    pub excavate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub value: String,
    pub size_px: u32,
    pub error_correction: ErrorCorrectionLevel,
    pub module_color: HexColor,
    /// `None` renders a transparent background.
    pub background_color: Option<HexColor>,
    pub corner_radius_px: f64,
    pub include_margin: bool,
    pub logo: Option<LogoPlacement>,
}

impl RenderOptions {
    /// Compute renderer parameters for `config` at `size_px`.
    ///
    /// A logo forces error correction H; a zero logo size embeds nothing.
    pub fn build(
        target_url: String,
        config: &VisualConfig,
        logo: Option<LogoSource>,
        size_px: u32,
    ) -> Self {
        let size = f64::from(size_px);
        let logo_edge = size * f64::from(config.logo_size_percent) / 100.0;

        let logo = logo
            .filter(|_| config.logo_size_percent > 0)
            .map(|source| LogoPlacement {
                src: source.url,
                shape: source.shape,
                width_px: logo_edge,
                height_px: logo_edge,
                excavate: true,
            });

        let error_correction = if logo.is_some() {
            ErrorCorrectionLevel::H
        } else {
            config.error_correction
        };

        let radius_percent = config.corner_radius_level * RADIUS_PERCENT_PER_LEVEL;

        Self {
            value: target_url,
            size_px,
            error_correction,
            module_color: config.module_color.clone(),
            background_color: None,
            corner_radius_px: size * f64::from(radius_percent) / 100.0,
            include_margin: false,
            logo,
        }
    }

    /// Paint the configured background instead of leaving it transparent.
    pub fn with_opaque_background(mut self, config: &VisualConfig) -> Self {
        self.background_color = Some(config.background_color.clone());
        self
    }
}
