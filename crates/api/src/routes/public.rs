//! Routes served without authentication.
//!
//! Two routers are provided:
//! - `redirect_router()` for the scan target, mounted at the root
//! - `api_router()` for page data, mounted at `/api/v1/public`

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET    /qr/{short_code}  -> redirect_short_code
/// ```
pub fn redirect_router() -> Router<AppState> {
    Router::new().route("/qr/{short_code}", get(public::redirect_short_code))
}

/// ```text
/// GET    /pages/{short_code}  -> get_public_page
/// ```
pub fn api_router() -> Router<AppState> {
    Router::new().route("/pages/{short_code}", get(public::get_public_page))
}
