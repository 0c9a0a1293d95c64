//! Unauthenticated endpoints hit by people scanning a QR code.
//!
//! When the request host is a registered domain, only that tenant's codes
//! are served from it. Any other host serves every active code.

use axum::extract::{Path, State};
use axum::http::header::{REFERER, USER_AGENT};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::Serialize;
use qrlanding_core::error::CoreError;
use qrlanding_core::hashing::hash_client_ip;
use qrlanding_core::logo::LogoShape;
use qrlanding_core::qr_style::VisualConfig;
use qrlanding_core::redirect::{links_page_path, RedirectType};
use qrlanding_core::short_code;
use qrlanding_db::models::link::Link;
use qrlanding_db::models::qr_code::QrCode;
use qrlanding_db::models::scan::NewScan;
use qrlanding_db::repositories::{LinkRepo, QrCodeRepo, ScanRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::qr_codes::stored_config;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tenancy::ResolvedTenant;

/// Data for rendering a link-list page.
#[derive(Debug, Serialize)]
pub struct PublicPage {
    pub short_code: String,
    pub title: String,
    pub redirect_type: RedirectType,
    pub redirect_url: Option<String>,
    pub logo_url: Option<String>,
    pub logo_shape: LogoShape,
    pub style: VisualConfig,
    pub links: Vec<Link>,
}

/// Find an active QR code visible from the resolved host.
async fn find_visible(
    state: &AppState,
    tenant: &ResolvedTenant,
    code: &str,
) -> AppResult<QrCode> {
    let not_found = || {
        AppError::Core(CoreError::NotFoundByKey {
            entity: "QrCode",
            key: code.to_string(),
        })
    };
    if !short_code::is_well_formed(code) {
        return Err(not_found());
    }
    QrCodeRepo::find_active_by_short_code(&state.pool, code, tenant.0.tenant_id)
        .await?
        .ok_or_else(not_found)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

fn scan_from_headers(headers: &HeaderMap, ip_hash_secret: &str) -> NewScan {
    NewScan {
        ip_hash: client_ip(headers).and_then(|ip| hash_client_ip(ip_hash_secret, &ip)),
        user_agent: header_str(headers, USER_AGENT.as_str()).map(str::to_string),
        referer: header_str(headers, REFERER.as_str()).map(str::to_string),
    }
}

/// GET /qr/{short_code}
///
/// Record a scan without waiting for it, then redirect to the configured
/// URL or the hosted link-list page.
pub async fn redirect_short_code(
    State(state): State<AppState>,
    tenant: ResolvedTenant,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let qr = find_visible(&state, &tenant, &code).await?;

    let scan = scan_from_headers(&headers, &state.config.ip_hash_secret);
    let pool = state.pool.clone();
    let qr_code_id = qr.id;
    tokio::spawn(async move {
        if let Err(e) = ScanRepo::record(&pool, qr_code_id, &scan).await {
            tracing::warn!(qr_code_id, error = %e, "Failed to record scan");
        }
    });

    let target = match (qr.redirect_kind()?, qr.redirect_url) {
        (RedirectType::Url, Some(url)) => url,
        _ => links_page_path(&qr.short_code),
    };

    tracing::debug!(qr_code_id, %target, "Redirecting scan");
    Ok(Redirect::temporary(&target))
}

/// GET /api/v1/public/pages/{short_code}
pub async fn get_public_page(
    State(state): State<AppState>,
    tenant: ResolvedTenant,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let qr = find_visible(&state, &tenant, &code).await?;
    let links = LinkRepo::list_active(&state.pool, qr.id).await?;

    let page = PublicPage {
        redirect_type: qr.redirect_kind()?,
        logo_shape: qr.logo_kind()?,
        style: stored_config(&qr)?,
        short_code: qr.short_code,
        title: qr.title,
        redirect_url: qr.redirect_url,
        logo_url: qr.logo_url,
        links,
    };

    Ok(Json(DataResponse { data: page }))
}
