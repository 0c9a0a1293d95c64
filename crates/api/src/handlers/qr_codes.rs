//! Handlers for QR code management: creation, destination, links, scan
//! stats and render options.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use qrlanding_core::error::CoreError;
use qrlanding_core::qr_style::VisualConfig;
use qrlanding_core::redirect::{self, RedirectType};
use qrlanding_core::render::{self, LogoSource, RenderOptions, DEFAULT_EXPORT_SIZE, EXPORT_SIZES};
use qrlanding_core::scannability::{assess, RiskAssessment};
use qrlanding_core::short_code;
use qrlanding_core::types::DbId;
use qrlanding_db::models::link::LinkInput;
use qrlanding_db::models::qr_code::{
    CreateQrCode, QrCode, QrCodeWithLinks, UpdateDestination, DEFAULT_TITLE,
};
use qrlanding_db::repositories::{DomainRepo, LinkRepo, QrCodeRepo, ScanRepo};

use crate::error::{unique_violation, AppError, AppResult};
use crate::middleware::auth::CurrentTenant;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted QR code or link title.
const MAX_TITLE_LEN: usize = 200;

/// Most links a single page may hold.
const MAX_LINKS: usize = 50;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a QR code the caller owns: 404 when absent, 403 when it belongs to
/// another tenant.
pub(crate) async fn load_owned(
    state: &AppState,
    current: &CurrentTenant,
    id: DbId,
) -> AppResult<QrCode> {
    let qr = QrCodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QrCode",
            id,
        }))?;
    current.ensure_owns(qr.tenant_id)?;
    Ok(qr)
}

/// The stored visual configuration. Stored rows are always valid, so a
/// failure here is an internal error rather than a bad request.
pub(crate) fn stored_config(qr: &QrCode) -> AppResult<VisualConfig> {
    qr.visual_config()
        .map_err(|e| AppError::InternalError(format!("QR code {} has invalid style: {e}", qr.id)))
}

async fn with_links(state: &AppState, qr_code: QrCode) -> AppResult<QrCodeWithLinks> {
    let links = LinkRepo::list_for_qr_code(&state.pool, qr_code.id).await?;
    Ok(QrCodeWithLinks { qr_code, links })
}

fn normalize_title(raw: &str, field: &str) -> Result<String, CoreError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/qr-codes
pub async fn list_qr_codes(
    current: CurrentTenant,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let qr_codes = QrCodeRepo::list_for_tenant(&state.pool, current.tenant.id).await?;
    Ok(Json(DataResponse { data: qr_codes }))
}

/// POST /api/v1/qr-codes
///
/// Create a QR code with a fresh short code. Collisions are retried with a
/// new candidate, up to [`short_code::MAX_ATTEMPTS`] times.
pub async fn create_qr_code(
    current: CurrentTenant,
    State(state): State<AppState>,
    body: Option<Json<CreateQrCode>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let title = match input.title.as_deref() {
        Some(raw) => normalize_title(raw, "title")?,
        None => DEFAULT_TITLE.to_string(),
    };

    let qr_code = insert_with_unique_code(&state.pool, current.tenant.id, &title, || {
        short_code::generate(short_code::DEFAULT_LENGTH)
    })
    .await?;

    tracing::info!(
        tenant_id = current.tenant.id,
        qr_code_id = qr_code.id,
        short_code = %qr_code.short_code,
        "QR code created",
    );
    let data = QrCodeWithLinks {
        qr_code,
        links: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// Insert a QR code under the first candidate from `next_code` that is not
/// already taken.
///
/// A violation of `uq_qr_codes_short_code` counts as a collision; any other
/// database error aborts.
pub async fn insert_with_unique_code<C>(
    pool: &PgPool,
    tenant_id: DbId,
    title: &str,
    next_code: C,
) -> AppResult<QrCode>
where
    C: FnMut() -> String,
{
    short_code::ensure_unique(next_code, move |code| async move {
        match QrCodeRepo::create(pool, tenant_id, &code, title).await {
            Ok(qr_code) => Ok(Some(qr_code)),
            Err(e) if unique_violation(&e) == Some("uq_qr_codes_short_code") => {
                tracing::warn!(tenant_id, short_code = %code, "Short code collision, retrying");
                Ok(None)
            }
            Err(e) => Err(AppError::from(e)),
        }
    })
    .await
}

/// GET /api/v1/qr-codes/{id}
pub async fn get_qr_code(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;
    let data = with_links(&state, qr).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/qr-codes/{id}/destination
pub async fn update_destination(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDestination>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &current, id).await?;

    let redirect_type = RedirectType::from_name(&input.redirect_type)?;
    let redirect_url = redirect::validate_destination(redirect_type, input.redirect_url.as_deref())?;

    let qr = QrCodeRepo::update_destination(
        &state.pool,
        id,
        redirect_type.name(),
        redirect_url.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "QrCode",
        id,
    }))?;

    tracing::info!(
        qr_code_id = id,
        redirect_type = redirect_type.name(),
        "QR code destination updated",
    );

    let data = with_links(&state, qr).await?;
    Ok(Json(DataResponse { data }))
}

/// Request body for `PUT /qr-codes/{id}/links`.
#[derive(Debug, Deserialize)]
pub struct ReplaceLinks {
    pub links: Vec<LinkInput>,
}

/// PUT /api/v1/qr-codes/{id}/links
///
/// Replace the whole link list; positions follow the submitted order.
pub async fn replace_links(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceLinks>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;

    if input.links.len() > MAX_LINKS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "At most {MAX_LINKS} links are allowed"
        ))));
    }

    let links = input
        .links
        .iter()
        .map(|link| {
            Ok(LinkInput {
                title: normalize_title(&link.title, "link title")?,
                url: redirect::validate_http_url(link.url.trim(), "link url")?,
                is_active: link.is_active,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    let links = LinkRepo::replace_all(&state.pool, id, &links).await?;

    tracing::info!(qr_code_id = id, count = links.len(), "QR code links replaced");

    Ok(Json(DataResponse {
        data: QrCodeWithLinks { qr_code: qr, links },
    }))
}

/// GET /api/v1/qr-codes/{id}/scans/summary
pub async fn scan_summary(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &current, id).await?;
    let summary = ScanRepo::summary(&state.pool, id).await?;
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// Render options
// ---------------------------------------------------------------------------

/// Query parameters for `GET /qr-codes/{id}/render`.
#[derive(Debug, Deserialize)]
pub struct RenderParams {
    /// Pixel size; one of [`EXPORT_SIZES`].
    pub size: Option<u32>,
    /// Domain to encode instead of the primary one.
    pub domain_id: Option<DbId>,
    /// Paint the configured background instead of transparency.
    #[serde(default)]
    pub opaque: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub options: RenderOptions,
    pub export_sizes: [u32; 4],
    pub assessment: RiskAssessment,
}

/// GET /api/v1/qr-codes/{id}/render
///
/// Compute the parameters for the external renderer. The encoded URL uses
/// the requested domain, else the tenant's primary domain, else the
/// platform host.
pub async fn render_options(
    current: CurrentTenant,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<impl IntoResponse> {
    let qr = load_owned(&state, &current, id).await?;
    let size_px = render::validate_size(params.size.unwrap_or(DEFAULT_EXPORT_SIZE))?;

    let domain = match params.domain_id {
        Some(domain_id) => {
            let domain = DomainRepo::find_by_id(&state.pool, domain_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Domain",
                    id: domain_id,
                }))?;
            current.ensure_owns(domain.tenant_id)?;
            Some(domain)
        }
        None => DomainRepo::find_primary(&state.pool, current.tenant.id).await?,
    };
    let host = domain
        .as_ref()
        .map_or(state.config.platform_host.as_str(), |d| d.hostname.as_str());

    let config = stored_config(&qr)?;
    let logo = match &qr.logo_url {
        Some(url) => Some(LogoSource {
            url: url.clone(),
            shape: qr.logo_kind()?,
        }),
        None => None,
    };

    let mut options =
        RenderOptions::build(render::target_url(host, &qr.short_code), &config, logo, size_px);
    if params.opaque {
        options = options.with_opaque_background(&config);
    }

    Ok(Json(DataResponse {
        data: RenderResponse {
            options,
            export_sizes: EXPORT_SIZES,
            assessment: assess(&config),
        },
    }))
}
