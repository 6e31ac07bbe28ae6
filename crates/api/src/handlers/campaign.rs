//! Handlers for campaign CRUD and the current-pricing lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::error::CoreError;
use canvass_core::types::DbId;
use canvass_db::models::campaign::{Campaign, CreateCampaign};
use canvass_db::models::user::ROLE_ADMIN;
use canvass_db::repositories::{CampaignRepo, SnapshotRepo, UserRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Load a campaign the caller is allowed to act on.
///
/// The caller's user row must exist (404 otherwise), and the caller must
/// own the campaign or hold the admin role (403 otherwise). The admin
/// check uses the stored role, not the token claim, so a demotion takes
/// effect without waiting for token expiry.
pub async fn load_owned_campaign(
    pool: &PgPool,
    auth: &AuthUser,
    campaign_id: DbId,
) -> AppResult<Campaign> {
    let user = UserRepo::find_by_id(pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        }))?;

    let campaign = CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "campaign",
            id: campaign_id,
        }))?;

    if campaign.owner_id != user.id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this campaign".into(),
        )));
    }

    Ok(campaign)
}

// ---------------------------------------------------------------------------
// POST /campaigns — create a draft campaign
// ---------------------------------------------------------------------------

/// Create a new campaign owned by the caller. Starts at draft/draft.
pub async fn create_campaign(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    // The caller's row must exist even on create.
    UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        }))?;

    let campaign = CampaignRepo::create(&state.pool, user.user_id, &body).await?;

    tracing::info!(
        campaign_id = campaign.id,
        owner_id = campaign.owner_id,
        "Campaign created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

// ---------------------------------------------------------------------------
// GET /campaigns/{id}
// ---------------------------------------------------------------------------

/// Fetch a campaign the caller owns (or any campaign, for admins).
pub async fn get_campaign(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: campaign }))
}

// ---------------------------------------------------------------------------
// GET /campaigns/{id}/pricing — current pricing snapshot
// ---------------------------------------------------------------------------

/// Fetch the campaign's current pricing: the most recent snapshot.
/// 404 when no snapshot has been created yet.
pub async fn get_campaign_pricing(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;

    let snapshot = SnapshotRepo::latest_for_campaign(&state.pool, campaign.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "pricing snapshot",
            id: campaign.id,
        }))?;

    Ok(Json(DataResponse { data: snapshot }))
}
