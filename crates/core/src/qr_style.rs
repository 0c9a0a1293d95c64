//! Visual configuration of a rendered QR code.
//!
//! [`VisualConfig`] is the complete, always-valid record persisted on a QR
//! code row. [`VisualConfigPatch`] carries the subset of fields a caller
//! wants to change; [`VisualConfig::apply`] is the only place the two are
//! merged, and it enforces the hard bounds before anything is stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Hard bounds
// ---------------------------------------------------------------------------

/// Smallest accepted logo size, as a percentage of the symbol edge.
pub const MIN_LOGO_SIZE_PERCENT: i32 = 0;

/// Largest accepted logo size. Above this the request is rejected outright,
/// independent of risk scoring.
pub const MAX_LOGO_SIZE_PERCENT: i32 = 40;

/// Smallest corner radius level (square corners).
pub const MIN_CORNER_RADIUS_LEVEL: i32 = 0;

/// Largest corner radius level (each level is 5% rounding, so 10 is a
/// fully rounded symbol).
pub const MAX_CORNER_RADIUS_LEVEL: i32 = 10;

/// Percentage of rounding contributed by one corner radius level.
pub const RADIUS_PERCENT_PER_LEVEL: i32 = 5;

// ---------------------------------------------------------------------------
// Error correction
// ---------------------------------------------------------------------------

/// QR error-correction level, lowest to highest redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrectionLevel {
    /// Parse the single-letter database / wire form.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(CoreError::Validation(format!(
                "Invalid error correction level '{other}'. Must be one of: L, M, Q, H"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// VisualConfig
// ---------------------------------------------------------------------------

/// Full visual configuration of a QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualConfig {
    pub logo_size_percent: i32,
    pub corner_radius_level: i32,
    pub module_color: HexColor,
    pub background_color: HexColor,
    pub error_correction: ErrorCorrectionLevel,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            logo_size_percent: 0,
            corner_radius_level: 0,
            module_color: HexColor::black(),
            background_color: HexColor::white(),
            error_correction: ErrorCorrectionLevel::H,
        }
    }
}

impl VisualConfig {
    /// Build from raw stored column values, validating each one.
    pub fn from_parts(
        logo_size_percent: i32,
        corner_radius_level: i32,
        module_color: &str,
        background_color: &str,
        error_correction: &str,
    ) -> Result<Self, CoreError> {
        let config = Self {
            logo_size_percent,
            corner_radius_level,
            module_color: HexColor::parse(module_color)?,
            background_color: HexColor::parse(background_color)?,
            error_correction: ErrorCorrectionLevel::from_name(error_correction)?,
        };
        config.validate_bounds()?;
        Ok(config)
    }

    /// Check the numeric fields against the hard bounds.
    pub fn validate_bounds(&self) -> Result<(), CoreError> {
        validate_logo_size(self.logo_size_percent)?;
        validate_corner_radius(self.corner_radius_level)
    }

    /// Corner rounding as a percentage of the symbol edge (0-50).
    pub fn corner_radius_percent(&self) -> i32 {
        self.corner_radius_level * RADIUS_PERCENT_PER_LEVEL
    }

    /// Merge `patch` onto this configuration.
    ///
    /// Every provided field is parsed and bounds-checked; the first
    /// violation is returned and `self` is left untouched.
    pub fn apply(&self, patch: &VisualConfigPatch) -> Result<Self, CoreError> {
        let mut next = self.clone();

        if let Some(size) = patch.logo_size_percent {
            validate_logo_size(size)?;
            next.logo_size_percent = size;
        }
        if let Some(level) = patch.corner_radius_level {
            validate_corner_radius(level)?;
            next.corner_radius_level = level;
        }
        if let Some(color) = &patch.module_color {
            next.module_color = HexColor::parse(color)?;
        }
        if let Some(color) = &patch.background_color {
            next.background_color = HexColor::parse(color)?;
        }
        if let Some(level) = &patch.error_correction {
            next.error_correction = ErrorCorrectionLevel::from_name(level)?;
        }

        Ok(next)
    }
}

/// Partial update of a [`VisualConfig`]; `None` leaves a field unchanged.
///
/// Fields arrive as raw wire values so that malformed input surfaces as a
/// [`CoreError::Validation`] from [`VisualConfig::apply`] rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualConfigPatch {
    pub logo_size_percent: Option<i32>,
    pub corner_radius_level: Option<i32>,
    pub module_color: Option<String>,
    pub background_color: Option<String>,
    pub error_correction: Option<String>,
}

impl VisualConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.logo_size_percent.is_none()
            && self.corner_radius_level.is_none()
            && self.module_color.is_none()
            && self.background_color.is_none()
            && self.error_correction.is_none()
    }
}

fn validate_logo_size(size: i32) -> Result<(), CoreError> {
    if !(MIN_LOGO_SIZE_PERCENT..=MAX_LOGO_SIZE_PERCENT).contains(&size) {
        return Err(CoreError::Validation(format!(
            "logo_size_percent must be between {MIN_LOGO_SIZE_PERCENT} and \
             {MAX_LOGO_SIZE_PERCENT}, got {size}"
        )));
    }
    Ok(())
}

fn validate_corner_radius(level: i32) -> Result<(), CoreError> {
    if !(MIN_CORNER_RADIUS_LEVEL..=MAX_CORNER_RADIUS_LEVEL).contains(&level) {
        return Err(CoreError::Validation(format!(
            "corner_radius_level must be between {MIN_CORNER_RADIUS_LEVEL} and \
             {MAX_CORNER_RADIUS_LEVEL}, got {level}"
        )));
    }
    Ok(())
}
