//! `#RRGGBB` colors and the WCAG contrast math used by the scannability
//! checks.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// A six-digit hex color, stored lower-cased with the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

/// Pure black, the safest module color.
pub const BLACK: &str = "#000000";

/// Pure white, the safest background color.
pub const WHITE: &str = "#ffffff";

impl HexColor {
    /// Parse `#RRGGBB` (case-insensitive).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if !HEX_COLOR_RE.is_match(raw) {
            return Err(CoreError::Validation(format!(
                "Invalid color '{raw}'. Use hex format like #000000"
            )));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn black() -> Self {
        Self(BLACK.to_string())
    }

    pub fn white() -> Self {
        Self(WHITE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three 8-bit channels.
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }

    /// Mean of the R, G and B channels (0-255).
    pub fn brightness(&self) -> f64 {
        let [r, g, b] = self.rgb();
        (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(&self) -> f64 {
        let [r, g, b] = self.rgb().map(|c| {
            let v = f64::from(c) / 255.0;
            if v <= 0.03928 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        });
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`. Order-independent.
pub fn contrast_ratio(a: &HexColor, b: &HexColor) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (brightest, darkest) = if la >= lb { (la, lb) } else { (lb, la) };
    (brightest + 0.05) / (darkest + 0.05)
}

impl FromStr for HexColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn parses_and_lowercases() {
        assert_eq!(c("#1A73E8").as_str(), "#1a73e8");
        assert_eq!(c("#1a73e8").rgb(), [0x1a, 0x73, 0xe8]);
    }

    #[test]
    fn rejects_malformed_colors() {
        for raw in ["000000", "#fff", "#gggggg", "#0000000", "", "red"] {
            assert!(HexColor::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn black_on_white_is_maximum_contrast() {
        let ratio = contrast_ratio(&c("#000000"), &c("#ffffff"));
        assert!((ratio - 21.0).abs() < 1e-9);
        assert!(ratio >= 7.0);
    }

    #[test]
    fn near_white_on_white_is_below_three() {
        assert!(contrast_ratio(&c("#eeeeee"), &c("#ffffff")) < 3.0);
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = c("#1a73e8");
        let b = c("#ffffff");
        assert_eq!(contrast_ratio(&a, &b), contrast_ratio(&b, &a));
    }

    #[test]
    fn brightness_is_channel_mean() {
        assert_eq!(c("#000000").brightness(), 0.0);
        assert_eq!(c("#808080").brightness(), 128.0);
        assert_eq!(c("#ff0000").brightness(), 85.0);
    }

    #[test]
    fn serde_round_trips_through_string() {
        let color: HexColor = serde_json::from_str("\"#ABCDEF\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#abcdef\"");
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }
}
