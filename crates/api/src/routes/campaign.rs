//! Route definitions for campaigns and their sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{approval, campaign, finalize, redemption, status};
use crate::state::AppState;

/// Campaign routes mounted at `/campaigns`.
///
/// ```text
/// POST  /                        -> create_campaign
/// GET   /{id}                    -> get_campaign
/// GET   /{id}/status             -> get_status
/// PATCH /{id}/status             -> change_status
/// POST  /{id}/approval           -> record_decision
/// GET   /{id}/approvals          -> list_history
/// GET   /{id}/pricing            -> get_campaign_pricing
/// POST  /{id}/finalize           -> finalize_campaign
/// POST  /{id}/rewards/redeem     -> redeem
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(campaign::create_campaign))
        .route("/{id}", get(campaign::get_campaign))
        .route(
            "/{id}/status",
            get(status::get_status).patch(status::change_status),
        )
        .route("/{id}/approval", post(approval::record_decision))
        .route("/{id}/approvals", get(approval::list_history))
        .route("/{id}/pricing", get(campaign::get_campaign_pricing))
        .route("/{id}/finalize", post(finalize::finalize_campaign))
        .route("/{id}/rewards/redeem", post(redemption::redeem))
}
