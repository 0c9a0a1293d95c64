//! Hostname-to-tenant resolution.
//!
//! Every inbound request carries a `Host` header. Custom domains registered
//! by a tenant map that host to the tenant; any other host (the platform
//! host, an unknown name) resolves to no tenant, which is not an error.

use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use qrlanding_core::hostname;
use qrlanding_core::types::DbId;
use qrlanding_db::models::domain::Domain;
use qrlanding_db::repositories::{DomainRepo, TenantRepo};
use qrlanding_db::DbPool;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::middleware::auth::DEFAULT_TENANT_NAME;
use crate::state::AppState;

/// Result of resolving a request's host.
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// Normalized host the lookup used.
    pub host: String,
    pub domain: Option<Domain>,
    pub tenant_id: Option<DbId>,
}

/// Look up the tenant owning `raw_host` by exact match on the normalized
/// hostname.
pub async fn resolve_tenant(pool: &DbPool, raw_host: &str) -> Result<TenantContext, sqlx::Error> {
    let host = hostname::normalize(raw_host);
    let domain = DomainRepo::find_by_hostname(pool, &host).await?;
    let tenant_id = domain.as_ref().map(|d| d.tenant_id);

    tracing::debug!(%host, ?tenant_id, "Resolved tenant from host");

    Ok(TenantContext {
        host,
        domain,
        tenant_id,
    })
}

/// Resolves the `Host` header of the current request.
#[derive(Debug, Clone)]
pub struct ResolvedTenant(pub TenantContext);

impl FromRequestParts<AppState> for ResolvedTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let context = resolve_tenant(&state.pool, raw_host).await?;
        Ok(ResolvedTenant(context))
    }
}

/// Startup backfill: make sure the tenant of `PLATFORM_OWNER_USER_ID` has a
/// primary domain, registering the platform host for it when it has none.
///
/// Does nothing when no owner is configured. Returns the owner's primary
/// domain, or `None` when the platform host belongs to another tenant.
pub async fn ensure_platform_domain(
    pool: &DbPool,
    config: &ServerConfig,
) -> Result<Option<Domain>, sqlx::Error> {
    let Some(owner) = config.platform_owner_user_id.as_deref() else {
        return Ok(None);
    };
    let tenant = TenantRepo::find_or_create(pool, owner, DEFAULT_TENANT_NAME).await?;
    let primary =
        DomainRepo::ensure_platform_primary(pool, tenant.id, &config.platform_host).await?;

    match &primary {
        Some(domain) => tracing::info!(
            tenant_id = tenant.id,
            hostname = %domain.hostname,
            domain_type = %domain.domain_type,
            "Platform owner has a primary domain",
        ),
        None => tracing::warn!(
            tenant_id = tenant.id,
            host = %config.platform_host,
            "Platform host is registered to another tenant",
        ),
    }
    Ok(primary)
}
