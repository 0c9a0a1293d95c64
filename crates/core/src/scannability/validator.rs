//! Risk scoring for a visual configuration.
//!
//! Risk only ever escalates while the checks run, with two exceptions that
//! force `Critical` outright: a combined logo + corner risk above
//! [`COMBINED_RISK_CRITICAL`] and any individual critical finding.

use serde::{Deserialize, Serialize};

use super::limits::{
    combined_risk, COMBINED_RISK_CRITICAL, COMBINED_RISK_HIGH, CORNER_PERCENT_HIGH,
    CORNER_PERCENT_MEDIUM, CORNER_PERCENT_UNSCANNABLE, LIGHT_MODULE_BRIGHTNESS,
    LOGO_NEEDS_HIGH_CORRECTION_PERCENT, SAFE_LIMITS,
};
use crate::color::contrast_ratio;
use crate::qr_style::{ErrorCorrectionLevel, VisualConfig};

/// Scannability risk, ordered from safest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// The one-line summary placed first in the suggestion list.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Critical => "This QR code configuration will likely NOT scan!",
            Self::High => "This configuration may have scanning issues",
            Self::Medium => "Configuration is acceptable but could be optimized",
            Self::Low => "QR code configuration looks good!",
        }
    }
}

/// Outcome of [`assess`]. Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub is_valid: bool,
    pub risk_level: RiskLevel,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Accumulates findings while the checks run.
struct Findings {
    level: RiskLevel,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    fn new() -> Self {
        Self {
            level: RiskLevel::Low,
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn escalate(&mut self, to: RiskLevel) {
        self.level = self.level.max(to);
    }

    fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    fn suggest(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }
}

/// Score `config` for scannability.
///
/// Pure and total: every well-formed configuration yields an assessment.
pub fn assess(config: &VisualConfig) -> RiskAssessment {
    let mut findings = Findings::new();

    check_logo_size(config, &mut findings);
    check_corner_radius(config, &mut findings);
    check_combined(config, &mut findings);
    check_contrast(config, &mut findings);
    check_module_brightness(config, &mut findings);

    let Findings {
        level,
        warnings,
        mut suggestions,
    } = findings;
    suggestions.insert(0, level.summary().to_string());

    RiskAssessment {
        is_valid: level != RiskLevel::Critical,
        risk_level: level,
        warnings,
        suggestions,
    }
}

fn check_logo_size(config: &VisualConfig, findings: &mut Findings) {
    let size = config.logo_size_percent;
    let limits = SAFE_LIMITS.logo_size;

    if size > limits.critical {
        findings.warn("Logo is very large and may prevent scanning");
        findings.suggest(format!(
            "Reduce logo size to {}% or less",
            limits.maximum
        ));
        findings.escalate(RiskLevel::Critical);
    } else if size > limits.maximum {
        findings.warn("Logo size is at the upper limit");
        findings.suggest(format!(
            "Consider reducing logo size to {LOGO_NEEDS_HIGH_CORRECTION_PERCENT}% for better reliability"
        ));
        findings.escalate(RiskLevel::Medium);
    } else if size > LOGO_NEEDS_HIGH_CORRECTION_PERCENT
        && config.error_correction != ErrorCorrectionLevel::H
    {
        // Informational only: a logo this size is fine with level H.
        findings.warn("Large logo requires high error correction");
        findings.suggest("Use high error correction (H) for better scanning");
    }
}

fn check_corner_radius(config: &VisualConfig, findings: &mut Findings) {
    let percent = config.corner_radius_percent();
    let maximum = SAFE_LIMITS.corner_radius.maximum;

    if percent >= CORNER_PERCENT_UNSCANNABLE {
        findings.warn("Fully rounded QR codes are not scannable");
        findings.suggest(format!(
            "Reduce corner radius to {maximum} or less ({}% rounding)",
            maximum * crate::qr_style::RADIUS_PERCENT_PER_LEVEL
        ));
        findings.escalate(RiskLevel::Critical);
    } else if percent > CORNER_PERCENT_HIGH {
        findings.warn("High corner radius may affect scanning");
        findings.suggest(format!(
            "Reduce corner radius to {maximum} or less for better reliability"
        ));
        findings.escalate(RiskLevel::High);
    } else if percent > CORNER_PERCENT_MEDIUM {
        findings.warn("Corner radius is approaching the safe limit");
        findings.escalate(RiskLevel::Medium);
    }
}

fn check_combined(config: &VisualConfig, findings: &mut Findings) {
    if config.logo_size_percent == 0 || config.corner_radius_level == 0 {
        return;
    }

    let combined = combined_risk(config.logo_size_percent, config.corner_radius_level);

    if combined > COMBINED_RISK_HIGH {
        findings.warn("Combination of large logo and rounded corners is risky");
        findings.suggest("Reduce either logo size or corner radius");
        findings.escalate(RiskLevel::High);
    }

    if combined > COMBINED_RISK_CRITICAL {
        findings.warn("This combination will likely fail to scan");
        findings.suggest("Significantly reduce logo size or corner radius");
        findings.escalate(RiskLevel::Critical);
    }
}

fn check_contrast(config: &VisualConfig, findings: &mut Findings) {
    let contrast = contrast_ratio(&config.module_color, &config.background_color);
    let limits = SAFE_LIMITS.color_contrast;

    if contrast < limits.critical {
        findings.warn("Very low color contrast will prevent scanning");
        findings.suggest("Use darker foreground color or lighter background");
        findings.escalate(RiskLevel::Critical);
    } else if contrast < limits.minimum {
        findings.warn("Low color contrast may affect scanning");
        findings.suggest("Increase contrast between QR code and background");
        findings.escalate(RiskLevel::High);
    } else if contrast < limits.optimal {
        findings.warn("Color contrast could be better");
        findings.suggest("Consider using black (#000000) for best results");
        findings.escalate(RiskLevel::Medium);
    }
}

fn check_module_brightness(config: &VisualConfig, findings: &mut Findings) {
    if config.module_color.brightness() > LIGHT_MODULE_BRIGHTNESS {
        findings.warn("Light QR colors are difficult to scan");
        findings.suggest("Use a darker color for better scanning");
        findings.escalate(RiskLevel::High);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;

    fn config(logo: i32, radius: i32) -> VisualConfig {
        VisualConfig {
            logo_size_percent: logo,
            corner_radius_level: radius,
            ..VisualConfig::default()
        }
    }

    fn with_colors(module: &str, background: &str) -> VisualConfig {
        VisualConfig {
            module_color: HexColor::parse(module).unwrap(),
            background_color: HexColor::parse(background).unwrap(),
            ..VisualConfig::default()
        }
    }

    #[test]
    fn default_config_is_low_risk() {
        let result = assess(&VisualConfig::default());
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.suggestions, vec![RiskLevel::Low.summary().to_string()]);
    }

    #[test]
    fn logo_above_35_is_always_critical() {
        for logo in 36..=40 {
            for radius in 0..=10 {
                let result = assess(&config(logo, radius));
                assert_eq!(result.risk_level, RiskLevel::Critical, "logo {logo} radius {radius}");
                assert!(!result.is_valid);
            }
        }
    }

    #[test]
    fn logo_between_30_and_35_is_medium() {
        assert_eq!(assess(&config(31, 0)).risk_level, RiskLevel::Medium);
        assert_eq!(assess(&config(35, 0)).risk_level, RiskLevel::Medium);
        assert_eq!(assess(&config(30, 0)).risk_level, RiskLevel::Low);
    }

    #[test]
    fn large_logo_without_level_h_only_warns() {
        let mut cfg = config(28, 0);
        cfg.error_correction = ErrorCorrectionLevel::M;
        let result = assess(&cfg);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.warnings, vec!["Large logo requires high error correction"]);

        cfg.error_correction = ErrorCorrectionLevel::H;
        assert!(assess(&cfg).warnings.is_empty());
    }

    #[test]
    fn full_rounding_is_always_critical() {
        for logo in 0..=40 {
            let result = assess(&config(logo, 10));
            assert_eq!(result.risk_level, RiskLevel::Critical);
            assert!(result
                .warnings
                .contains(&"Fully rounded QR codes are not scannable".to_string()));
        }
    }

    #[test]
    fn corner_radius_bands() {
        assert_eq!(assess(&config(0, 4)).risk_level, RiskLevel::Low);
        assert_eq!(assess(&config(0, 5)).risk_level, RiskLevel::Medium);
        assert_eq!(assess(&config(0, 6)).risk_level, RiskLevel::Medium);
        assert_eq!(assess(&config(0, 7)).risk_level, RiskLevel::High);
        assert_eq!(assess(&config(0, 9)).risk_level, RiskLevel::High);
    }

    #[test]
    fn combined_risk_escalates_to_high() {
        // 0.25 + 0.4 = 0.65: neither setting alone raises risk.
        let result = assess(&config(25, 4));
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result
            .warnings
            .contains(&"Combination of large logo and rounded corners is risky".to_string()));
    }

    #[test]
    fn combined_risk_above_point_eight_forces_critical() {
        // 0.30 + 0.6 = 0.9; individually logo is fine and corner is medium.
        let result = assess(&config(30, 6));
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert!(!result.is_valid);
    }

    #[test]
    fn combined_check_skipped_without_logo() {
        // 0.9 combined if counted, but no logo means the corner band rules.
        assert_eq!(assess(&config(0, 9)).risk_level, RiskLevel::High);
    }

    #[test]
    fn black_on_white_has_no_color_findings() {
        let result = assess(&with_colors("#000000", "#ffffff"));
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn near_white_module_is_critical() {
        let result = assess(&with_colors("#eeeeee", "#ffffff"));
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert!(result
            .warnings
            .contains(&"Very low color contrast will prevent scanning".to_string()));
    }

    #[test]
    fn contrast_bands() {
        // 4.48:1
        assert_eq!(assess(&with_colors("#777777", "#ffffff")).risk_level, RiskLevel::High);
        // 4.51:1
        assert_eq!(assess(&with_colors("#1a73e8", "#ffffff")).risk_level, RiskLevel::Medium);
        // 7.005:1
        assert_eq!(assess(&with_colors("#595959", "#ffffff")).risk_level, RiskLevel::Low);
        // 1.66:1
        assert_eq!(assess(&with_colors("#000000", "#333333")).risk_level, RiskLevel::Critical);
    }

    #[test]
    fn light_module_on_dark_background_is_high() {
        let result = assess(&with_colors("#ffffff", "#000000"));
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result
            .warnings
            .contains(&"Light QR colors are difficult to scan".to_string()));
    }

    #[test]
    fn risk_never_downgrades() {
        // Critical logo followed by a medium corner finding stays critical.
        assert_eq!(assess(&config(38, 5)).risk_level, RiskLevel::Critical);
    }

    #[test]
    fn summary_is_first_suggestion() {
        for (cfg, level) in [
            (config(0, 0), RiskLevel::Low),
            (config(31, 0), RiskLevel::Medium),
            (config(0, 7), RiskLevel::High),
            (config(40, 10), RiskLevel::Critical),
        ] {
            let result = assess(&cfg);
            assert_eq!(result.risk_level, level);
            assert_eq!(result.suggestions[0], level.summary());
        }
    }

    #[test]
    fn corner_suggestion_uses_table_maximum() {
        let result = assess(&config(0, 7));
        assert!(result
            .suggestions
            .contains(&"Reduce corner radius to 5 or less for better reliability".to_string()));
    }

    #[test]
    fn scenario_forty_ten_is_critical() {
        let result = assess(&config(40, 10));
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert!(!result.is_valid);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"critical\"");
    }
}
