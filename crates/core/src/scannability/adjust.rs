//! Auto-correction of a visual configuration into safe bounds.

use super::limits::{combined_risk, COMBINED_RISK_TARGET, LIGHT_MODULE_BRIGHTNESS, SAFE_LIMITS};
use crate::color::{contrast_ratio, HexColor};
use crate::qr_style::VisualConfig;

/// Return a copy of `config` clamped and rescaled into safe bounds.
///
/// 1. Logo size and corner radius are clamped to their `maximum` limits.
/// 2. While both are in use and their combined risk exceeds
///    [`COMBINED_RISK_TARGET`], both are scaled by `target / combined` and
///    rounded to the nearest integer. The pass repeats until it stops
///    changing anything, which keeps the function idempotent.
/// 3. A light or low-contrast module color becomes black; if the background
///    is then still too dark it becomes white.
///
/// Error correction is left as configured.
pub fn auto_adjust(config: &VisualConfig) -> VisualConfig {
    let mut adjusted = config.clone();

    adjusted.logo_size_percent = adjusted
        .logo_size_percent
        .min(SAFE_LIMITS.logo_size.maximum);
    adjusted.corner_radius_level = adjusted
        .corner_radius_level
        .min(SAFE_LIMITS.corner_radius.maximum);

    let (logo, radius) = scale_to_target(adjusted.logo_size_percent, adjusted.corner_radius_level);
    adjusted.logo_size_percent = logo;
    adjusted.corner_radius_level = radius;

    fix_colors(&mut adjusted);
    adjusted
}

fn scale_to_target(mut logo: i32, mut radius: i32) -> (i32, i32) {
    while logo != 0 && radius != 0 {
        let combined = combined_risk(logo, radius);
        if combined <= COMBINED_RISK_TARGET {
            break;
        }
        let factor = COMBINED_RISK_TARGET / combined;
        let next_logo = (f64::from(logo) * factor).round() as i32;
        let next_radius = (f64::from(radius) * factor).round() as i32;
        if (next_logo, next_radius) == (logo, radius) {
            break;
        }
        logo = next_logo;
        radius = next_radius;
    }
    (logo, radius)
}

fn fix_colors(config: &mut VisualConfig) {
    let minimum = SAFE_LIMITS.color_contrast.minimum;

    let module_is_light = config.module_color.brightness() > LIGHT_MODULE_BRIGHTNESS;
    if module_is_light || contrast_ratio(&config.module_color, &config.background_color) < minimum
    {
        config.module_color = HexColor::black();
    }
    if contrast_ratio(&config.module_color, &config.background_color) < minimum {
        config.background_color = HexColor::white();
    }
}
