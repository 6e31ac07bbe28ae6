//! Handlers for the approval workflow.
//!
//! Every decision appends a `campaign_approvals` row; the campaign's
//! `approval_status` column is only a denormalized pointer to the latest
//! entry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::approval::{validate_approval_decision, ApprovalStatus};
use canvass_core::types::DbId;
use canvass_db::models::approval::CreateApproval;
use canvass_db::repositories::{ApprovalRepo, CampaignQuestionRepo, CampaignRepo, SnapshotRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::campaign::load_owned_campaign;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /campaigns/{id}/approval — record a decision
// ---------------------------------------------------------------------------

/// Request body for an approval decision.
#[derive(Debug, Deserialize)]
pub struct ApprovalDecisionRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// Record an approval decision and move the denormalized pointer.
pub async fn record_decision(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(body): Json<ApprovalDecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;
    let requested = ApprovalStatus::from_str_db(&body.status)?;

    let question_count = CampaignQuestionRepo::count_for_campaign(&state.pool, campaign.id).await?;
    let snapshot_count = SnapshotRepo::count_for_campaign(&state.pool, campaign.id).await?;
    validate_approval_decision(requested, question_count, snapshot_count)?;

    let approval = ApprovalRepo::create(
        &state.pool,
        &CreateApproval {
            campaign_id: campaign.id,
            status: requested.as_str().to_string(),
            reviewed_by: Some(user.user_id),
            notes: body.notes,
        },
    )
    .await?;

    CampaignRepo::set_approval_status(&state.pool, campaign.id, requested.as_str()).await?;

    tracing::info!(
        campaign_id = campaign.id,
        approval_id = approval.id,
        status = requested.as_str(),
        reviewed_by = user.user_id,
        "Approval decision recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: approval })))
}

// ---------------------------------------------------------------------------
// GET /campaigns/{id}/approvals — decision history
// ---------------------------------------------------------------------------

/// Full approval history, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;
    let history = ApprovalRepo::list_for_campaign(&state.pool, campaign.id).await?;
    Ok(Json(DataResponse { data: history }))
}
