//! Handlers for a QR code's visual configuration.
//!
//! Every change is scored by the scannability validator. Risk is reported
//! in the response; only a critical result can block the write, and only
//! when `REJECT_CRITICAL_STYLES` is enabled.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use qrlanding_core::error::CoreError;
use qrlanding_core::qr_style::{VisualConfig, VisualConfigPatch};
use qrlanding_core::scannability::{assess, auto_adjust, RiskAssessment};
use qrlanding_core::types::DbId;
use qrlanding_db::models::qr_code::QrCode;
use qrlanding_db::repositories::QrCodeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::qr_codes::{load_owned, stored_config};
use crate::middleware::auth::CurrentTenant;
use crate::response::DataResponse;
use crate::state::AppState;

/// A saved style and its assessment.
#[derive(Debug, Serialize)]
pub struct StyleResponse {
    pub qr_code: QrCode,
    pub assessment: RiskAssessment,
}

/// An unsaved style and its assessment.
#[derive(Debug, Serialize)]
pub struct StylePreview {
    pub config: VisualConfig,
    pub assessment: RiskAssessment,
}

async fn save(
    state: &AppState,
    id: DbId,
    config: &VisualConfig,
    assessment: RiskAssessment,
) -> AppResult<StyleResponse> {
    if state.config.reject_critical_styles && !assessment.is_valid {
        return Err(AppError::Unprocessable(
            "This style will likely not scan. Reduce logo size or corner rounding, \
             or use stronger contrast."
                .into(),
        ));
    }

    let qr_code = QrCodeRepo::update_style(&state.pool, id, config)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QrCode",
            id,
        }))?;

    tracing::info!(
        qr_code_id = id,
        risk_level = ?assessment.risk_level,
        "QR code style updated",
    );

    Ok(StyleResponse {
        qr_code,
        assessment,
    })
}

/// PUT /api/v1/qr-codes/{id}/style
///
/// Merge the patch onto the stored style, assess and persist it.
pub async fn update_style(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<VisualConfigPatch>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;
    let next = stored_config(&qr)?.apply(&patch)?;
    let assessment = assess(&next);

    let data = save(&state, id, &next, assessment).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/qr-codes/{id}/style/preview
///
/// Assess the merged patch without saving it.
pub async fn preview_style(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<VisualConfigPatch>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;
    let config = stored_config(&qr)?.apply(&patch)?;
    let assessment = assess(&config);

    Ok(Json(DataResponse {
        data: StylePreview { config, assessment },
    }))
}

/// POST /api/v1/qr-codes/{id}/style/auto-adjust
///
/// Replace the stored style with its auto-adjusted form.
pub async fn auto_adjust_style(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;
    let adjusted = auto_adjust(&stored_config(&qr)?);
    let assessment = assess(&adjusted);

    let data = save(&state, id, &adjusted, assessment).await?;
    Ok(Json(DataResponse { data }))
}
