//! Route definitions for stateless pricing calculations.

use axum::routing::post;
use axum::Router;

use crate::handlers::pricing;
use crate::state::AppState;

/// Pricing routes mounted at `/pricing`.
///
/// ```text
/// POST /calculate         -> calculate
/// POST /quote             -> quote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(pricing::calculate))
        .route("/quote", post(pricing::quote))
}
