//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use qrlanding_core::error::CoreError;
use qrlanding_db::models::tenant::Tenant;
use qrlanding_db::repositories::TenantRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name given to a tenant created for a caller without an email claim.
pub(crate) const DEFAULT_TENANT_NAME: &str = "My Workspace";

/// Authenticated caller extracted from a JWT Bearer token in the
/// `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity provider's user id (from `claims.sub`).
    pub user_id: String,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// The authenticated caller's tenant.
///
/// Tenants are created lazily: the first authenticated request of a new
/// user creates one.
#[derive(Debug, Clone)]
pub struct CurrentTenant {
    pub user: AuthUser,
    pub tenant: Tenant,
}

impl CurrentTenant {
    /// Reject resources that belong to another tenant.
    pub fn ensure_owns(&self, owner_tenant_id: i64) -> Result<(), AppError> {
        if owner_tenant_id == self.tenant.id {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Resource belongs to another tenant".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for CurrentTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let name = user.email.as_deref().unwrap_or(DEFAULT_TENANT_NAME);
        let tenant = TenantRepo::find_or_create(&state.pool, &user.user_id, name).await?;
        Ok(CurrentTenant { user, tenant })
    }
}
