//! Route definitions for QR codes and their style, destination, links and
//! logo.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use qrlanding_core::logo::MAX_LOGO_BYTES;

use crate::handlers::{logo, qr_codes, style};
use crate::state::AppState;

/// Headroom over the logo size for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// QR code routes mounted at `/qr-codes`.
///
/// ```text
/// GET    /                       -> list_qr_codes
/// POST   /                       -> create_qr_code
/// GET    /{id}                   -> get_qr_code
/// PUT    /{id}/style             -> update_style
/// POST   /{id}/style/preview     -> preview_style
/// POST   /{id}/style/auto-adjust -> auto_adjust_style
/// PUT    /{id}/destination       -> update_destination
/// PUT    /{id}/links             -> replace_links
/// POST   /{id}/logo              -> upload_logo
/// DELETE /{id}/logo              -> remove_logo
/// PUT    /{id}/logo/shape        -> update_logo_shape
/// GET    /{id}/render            -> render_options
/// GET    /{id}/scans/summary     -> scan_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(qr_codes::list_qr_codes).post(qr_codes::create_qr_code),
        )
        .route("/{id}", get(qr_codes::get_qr_code))
        .route("/{id}/style", put(style::update_style))
        .route("/{id}/style/preview", post(style::preview_style))
        .route("/{id}/style/auto-adjust", post(style::auto_adjust_style))
        .route("/{id}/destination", put(qr_codes::update_destination))
        .route("/{id}/links", put(qr_codes::replace_links))
        .route(
            "/{id}/logo",
            post(logo::upload_logo)
                .delete(logo::remove_logo)
                .layer(DefaultBodyLimit::max(MAX_LOGO_BYTES + MULTIPART_OVERHEAD)),
        )
        .route("/{id}/logo/shape", put(logo::update_logo_shape))
        .route("/{id}/render", get(qr_codes::render_options))
        .route("/{id}/scans/summary", get(qr_codes::scan_summary))
}
