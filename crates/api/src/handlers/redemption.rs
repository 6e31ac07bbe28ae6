//! Handler for contributor reward redemption via the external provider.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::campaign::load_owned_campaign;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::rewards::RedemptionOrder;
use crate::state::AppState;

/// Request body for a redemption.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub contributor_id: DbId,
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// POST /campaigns/{id}/rewards/redeem
// ---------------------------------------------------------------------------

/// Redeem a contributor reward against the external provider.
///
/// The provider call retries with linear backoff; after the final attempt
/// fails, the last error comes back as a 502.
pub async fn redeem(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(body): Json<RedeemRequest>,
) -> AppResult<impl IntoResponse> {
    if body.amount <= 0.0 {
        return Err(AppError::BadRequest("amount must be positive".into()));
    }

    let campaign = load_owned_campaign(&state.pool, &user, id).await?;

    let order = RedemptionOrder {
        campaign_id: campaign.id,
        contributor_id: body.contributor_id,
        amount: body.amount,
        currency: campaign.currency.clone(),
    };

    let receipt = state
        .rewards
        .redeem(&order)
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    Ok(Json(DataResponse { data: receipt }))
}
