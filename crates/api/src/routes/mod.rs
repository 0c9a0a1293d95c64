pub mod domains;
pub mod health;
pub mod public;
pub mod qr_codes;
pub mod scannability;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tenant                                 caller's tenant (created on first use)
///
/// /domains                                list, register
/// /domains/{id}/primary                   make primary (PATCH)
///
/// /qr-codes                               list, create
/// /qr-codes/{id}                          get with links
/// /qr-codes/{id}/style                    update (PUT)
/// /qr-codes/{id}/style/preview            assess without saving (POST)
/// /qr-codes/{id}/style/auto-adjust        correct and save (POST)
/// /qr-codes/{id}/destination              redirect type and URL (PUT)
/// /qr-codes/{id}/links                    replace link list (PUT)
/// /qr-codes/{id}/logo                     upload (POST), remove (DELETE)
/// /qr-codes/{id}/logo/shape               square or circle (PUT)
/// /qr-codes/{id}/render                   renderer parameters
/// /qr-codes/{id}/scans/summary            scan counts
///
/// /scannability/assess                    stateless assessment (POST)
/// /scannability/auto-adjust               stateless correction (POST)
/// /scannability/limits                    threshold table
/// ```
///
/// Public page data (`/public/pages/{short_code}`) is mounted separately
/// by the app router because it needs its own CORS policy.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tenant", get(handlers::tenant::get_tenant))
        .nest("/domains", domains::router())
        .nest("/qr-codes", qr_codes::router())
        .nest("/scannability", scannability::router())
}
