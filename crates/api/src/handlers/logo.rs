//! Handlers for QR code logos.
//!
//! Replacing a logo uploads the new object first, then points the row at
//! it, then deletes the previous object. A failed upload leaves the old
//! logo untouched; a failed row update deletes the new object again. Old
//! objects that cannot be deleted are only logged.

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use qrlanding_core::error::CoreError;
use qrlanding_core::logo::{self, LogoShape};
use qrlanding_core::types::DbId;
use qrlanding_db::models::qr_code::QrCode;
use qrlanding_db::repositories::QrCodeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::qr_codes::load_owned;
use crate::middleware::auth::CurrentTenant;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the logo file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct LogoResponse {
    pub logo_url: Option<String>,
    pub qr_code: QrCode,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLogoShape {
    pub logo_shape: String,
}

/// Delete the object behind a stored logo URL, logging failures.
async fn remove_stored_logo(state: &AppState, qr_code_id: DbId, logo_url: &str) {
    let Some(path) = logo::object_path_from_url(logo_url, state.storage.bucket()) else {
        tracing::debug!(qr_code_id, %logo_url, "Logo URL is outside the bucket, not deleting");
        return;
    };
    if let Err(e) = state.storage.remove(&path).await {
        tracing::warn!(qr_code_id, %path, error = %e, "Failed to delete old logo object");
    }
}

/// POST /api/v1/qr-codes/{id}/logo
///
/// Upload a logo (multipart field `file`) and attach it to the QR code.
pub async fn upload_logo(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("File has no content type".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((content_type, data.to_vec()));
        break;
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("No file provided".into()))?;
    logo::validate_upload(&content_type, &data)?;

    let path = logo::object_path(
        current.tenant.id,
        id,
        chrono::Utc::now().timestamp_millis(),
        &content_type,
    );
    let logo_url = state.storage.upload(&path, data, &content_type).await?;

    let updated = match QrCodeRepo::update_logo(&state.pool, id, Some(&logo_url)).await {
        Ok(Some(updated)) => updated,
        result => {
            if let Err(e) = state.storage.remove(&path).await {
                tracing::warn!(qr_code_id = id, %path, error = %e, "Failed to clean up new logo");
            }
            return Err(match result {
                Err(e) => AppError::Database(e),
                _ => AppError::Core(CoreError::NotFound {
                    entity: "QrCode",
                    id,
                }),
            });
        }
    };

    if let Some(old_url) = qr.logo_url.as_deref().filter(|old| *old != logo_url) {
        remove_stored_logo(&state, id, old_url).await;
    }

    tracing::info!(qr_code_id = id, %path, "Logo uploaded");

    Ok(Json(DataResponse {
        data: LogoResponse {
            logo_url: Some(logo_url),
            qr_code: updated,
        },
    }))
}

/// DELETE /api/v1/qr-codes/{id}/logo
pub async fn remove_logo(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;

    let updated = QrCodeRepo::update_logo(&state.pool, id, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QrCode",
            id,
        }))?;

    if let Some(old_url) = qr.logo_url.as_deref() {
        remove_stored_logo(&state, id, old_url).await;
        tracing::info!(qr_code_id = id, "Logo removed");
    }

    Ok(Json(DataResponse {
        data: LogoResponse {
            logo_url: None,
            qr_code: updated,
        },
    }))
}

/// PUT /api/v1/qr-codes/{id}/logo/shape
pub async fn update_logo_shape(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLogoShape>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &current, id).await?;
    let shape = LogoShape::from_name(&input.logo_shape)?;

    let updated = QrCodeRepo::update_logo_shape(&state.pool, id, shape.name())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QrCode",
            id,
        }))?;

    tracing::info!(qr_code_id = id, logo_shape = shape.name(), "Logo shape updated");

    Ok(Json(DataResponse { data: updated }))
}
