//! Stateless scannability endpoints for editors that score a style before
//! any QR code exists.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use qrlanding_core::qr_style::{VisualConfig, VisualConfigPatch};
use qrlanding_core::scannability::{assess, auto_adjust, RiskAssessment, SAFE_LIMITS};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct AdjustResult {
    pub original: VisualConfig,
    pub original_assessment: RiskAssessment,
    pub adjusted: VisualConfig,
    pub assessment: RiskAssessment,
}

/// POST /api/v1/scannability/assess
///
/// Body is a style patch over the defaults.
pub async fn assess_config(
    _user: AuthUser,
    Json(patch): Json<VisualConfigPatch>,
) -> AppResult<impl IntoResponse> {
    let config = VisualConfig::default().apply(&patch)?;
    Ok(Json(DataResponse {
        data: assess(&config),
    }))
}

/// POST /api/v1/scannability/auto-adjust
pub async fn auto_adjust_config(
    _user: AuthUser,
    Json(patch): Json<VisualConfigPatch>,
) -> AppResult<impl IntoResponse> {
    let original = VisualConfig::default().apply(&patch)?;
    let adjusted = auto_adjust(&original);

    Ok(Json(DataResponse {
        data: AdjustResult {
            original_assessment: assess(&original),
            assessment: assess(&adjusted),
            original,
            adjusted,
        },
    }))
}

/// GET /api/v1/scannability/limits
///
/// The threshold table shared by the validator and the auto-corrector.
pub async fn get_limits(_user: AuthUser) -> impl IntoResponse {
    Json(DataResponse { data: SAFE_LIMITS })
}
