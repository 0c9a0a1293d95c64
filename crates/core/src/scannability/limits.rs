//! The threshold table shared by the validator and the auto-corrector.

use serde::Serialize;

/// Optimal / maximum / critical bounds for an integer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntLimit {
    pub optimal: i32,
    pub maximum: i32,
    pub critical: i32,
}

/// Contrast-ratio bounds (higher is safer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastLimit {
    pub optimal: f64,
    pub minimum: f64,
    pub critical: f64,
}

/// Recommended safe limits for every visual setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeLimits {
    /// Logo size, percent of the symbol edge.
    pub logo_size: IntLimit,
    /// Corner radius level (x5 = percent rounding).
    pub corner_radius: IntLimit,
    pub color_contrast: ContrastLimit,
}

pub const SAFE_LIMITS: SafeLimits = SafeLimits {
    logo_size: IntLimit {
        optimal: 20,
        maximum: 30,
        critical: 35,
    },
    corner_radius: IntLimit {
        optimal: 3,
        maximum: 5,
        critical: 8,
    },
    color_contrast: ContrastLimit {
        optimal: 7.0,
        minimum: 4.5,
        critical: 3.0,
    },
};

/// Logo size above which high error correction is recommended.
pub const LOGO_NEEDS_HIGH_CORRECTION_PERCENT: i32 = 25;

/// Corner rounding at or above which the symbol cannot be decoded.
pub const CORNER_PERCENT_UNSCANNABLE: i32 = 50;

/// Corner rounding above which risk is at least high.
pub const CORNER_PERCENT_HIGH: i32 = 30;

/// Corner rounding above which risk is at least medium.
pub const CORNER_PERCENT_MEDIUM: i32 = 20;

/// Combined logo + corner risk above which risk is at least high.
pub const COMBINED_RISK_HIGH: f64 = 0.6;

/// Combined logo + corner risk above which the code is assumed unreadable.
pub const COMBINED_RISK_CRITICAL: f64 = 0.8;

/// Target combined risk the auto-corrector scales down to.
pub const COMBINED_RISK_TARGET: f64 = 0.55;

/// Channel-mean brightness above which a module color counts as light.
pub const LIGHT_MODULE_BRIGHTNESS: f64 = 128.0;

/// Heuristic merging logo-size fraction and corner-radius fraction.
///
/// Only meaningful when both settings are in use; callers skip the check
/// when either is zero.
pub fn combined_risk(logo_size_percent: i32, corner_radius_level: i32) -> f64 {
    f64::from(logo_size_percent) / 100.0 + f64::from(corner_radius_level) / 10.0
}
