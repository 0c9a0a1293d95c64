//! Route definitions for tenant domains.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::domains;
use crate::state::AppState;

/// Domain routes mounted at `/domains`.
///
/// ```text
/// GET    /                -> list_domains
/// POST   /                -> create_domain
/// PATCH  /{id}/primary    -> set_primary_domain
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(domains::list_domains).post(domains::create_domain))
        .route("/{id}/primary", patch(domains::set_primary_domain))
}
