use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scannability;
use crate::state::AppState;

/// Stateless scannability routes mounted at `/scannability`.
///
/// ```text
/// POST   /assess       -> assess_config
/// POST   /auto-adjust  -> auto_adjust_config
/// GET    /limits       -> get_limits
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assess", post(scannability::assess_config))
        .route("/auto-adjust", post(scannability::auto_adjust_config))
        .route("/limits", get(scannability::get_limits))
}
