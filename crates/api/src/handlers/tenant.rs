use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::CurrentTenant;
use crate::response::DataResponse;

/// GET /api/v1/tenant
///
/// Return the caller's tenant, creating it on first access.
pub async fn get_tenant(current: CurrentTenant) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: current.tenant,
    }))
}
