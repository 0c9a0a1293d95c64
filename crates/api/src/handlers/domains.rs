//! Handlers for tenant domain management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use qrlanding_core::error::CoreError;
use qrlanding_core::hostname;
use qrlanding_core::types::DbId;
use qrlanding_db::models::domain::{CreateDomain, DOMAIN_TYPE_CUSTOM, DOMAIN_TYPE_PLATFORM};
use qrlanding_db::repositories::DomainRepo;

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::auth::CurrentTenant;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/domains
///
/// List the caller's domains, primary first.
pub async fn list_domains(
    current: CurrentTenant,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let domains = DomainRepo::list_for_tenant(&state.pool, current.tenant.id).await?;
    Ok(Json(DataResponse { data: domains }))
}

/// POST /api/v1/domains
///
/// Register a hostname. The tenant's first domain becomes primary.
pub async fn create_domain(
    current: CurrentTenant,
    State(state): State<AppState>,
    Json(input): Json<CreateDomain>,
) -> AppResult<impl IntoResponse> {
    let hostname = hostname::normalize_for_registration(&input.hostname)?;

    let domain_type = input.domain_type.as_deref().unwrap_or(DOMAIN_TYPE_CUSTOM);
    if domain_type != DOMAIN_TYPE_CUSTOM && domain_type != DOMAIN_TYPE_PLATFORM {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid domain type '{domain_type}'. Must be one of: custom, platform"
        ))));
    }

    let domain = DomainRepo::create(&state.pool, current.tenant.id, &hostname, domain_type)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some("uq_domains_hostname") => {
                AppError::Core(CoreError::Conflict("Hostname already in use".into()))
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(
        tenant_id = current.tenant.id,
        domain_id = domain.id,
        hostname = %domain.hostname,
        is_primary = domain.is_primary,
        "Domain registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: domain })))
}

/// PATCH /api/v1/domains/{id}/primary
///
/// Make the domain the caller's only primary domain.
pub async fn set_primary_domain(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(domain_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = DomainRepo::find_by_id(&state.pool, domain_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Domain",
            id: domain_id,
        }))?;
    current.ensure_owns(existing.tenant_id)?;

    let domain = DomainRepo::set_primary(&state.pool, current.tenant.id, domain_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Domain",
            id: domain_id,
        }))?;

    tracing::info!(
        tenant_id = current.tenant.id,
        domain_id,
        "Primary domain changed",
    );

    Ok(Json(DataResponse { data: domain }))
}
