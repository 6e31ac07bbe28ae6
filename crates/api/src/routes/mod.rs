pub mod campaign;
pub mod health;
pub mod pricing;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pricing/calculate                  operational pricing summary (POST)
/// /pricing/quote                      full quote with fees (POST)
///
/// /campaigns                          create (POST)
/// /campaigns/{id}                     get (GET)
/// /campaigns/{id}/status              summary, transition (GET, PATCH)
/// /campaigns/{id}/approval            record decision (POST)
/// /campaigns/{id}/approvals           decision history (GET)
/// /campaigns/{id}/pricing             current snapshot (GET)
/// /campaigns/{id}/finalize            finalize wizard data (POST)
/// /campaigns/{id}/rewards/redeem      redeem contributor reward (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Stateless pricing calculations.
        .nest("/pricing", pricing::router())
        // Campaign lifecycle, approval, finalization, rewards.
        .nest("/campaigns", campaign::router())
}
