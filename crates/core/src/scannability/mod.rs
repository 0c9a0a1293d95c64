//! Scannability engine.
//!
//! Scores a [`VisualConfig`](crate::qr_style::VisualConfig) for the risk
//! that scanners fail to decode it, and corrects risky configurations into
//! safe bounds. Both halves read the same threshold table in [`limits`].

pub mod adjust;
pub mod limits;
pub mod validator;

pub use adjust::auto_adjust;
pub use limits::{SafeLimits, SAFE_LIMITS};
pub use validator::{assess, RiskAssessment, RiskLevel};
