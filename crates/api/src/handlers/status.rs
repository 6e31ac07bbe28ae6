//! Handlers for the campaign lifecycle state machine.
//!
//! The status column is only ever written here, after
//! `canvass_core::lifecycle` has validated the transition. Question
//! activation cascades are best effort: a cascade failure is logged and the
//! already-committed status change stands.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::approval::ApprovalStatus;
use canvass_core::lifecycle::{
    available_transitions, can_start, question_cascade, validate_status_change, CampaignStatus,
    StatusChangeContext,
};
use canvass_core::types::DbId;
use canvass_core::wizard::WizardData;
use canvass_db::models::campaign::Campaign;
use canvass_db::repositories::{CampaignQuestionRepo, CampaignRepo, QuestionRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::handlers::campaign::load_owned_campaign;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Read the campaign facts the state machine needs.
async fn status_context(pool: &PgPool, campaign: &Campaign) -> AppResult<StatusChangeContext> {
    let question_count = CampaignQuestionRepo::count_for_campaign(pool, campaign.id).await?;
    let approval_status = ApprovalStatus::from_str_db(&campaign.approval_status)?;

    // An unparseable wizard document simply fails the pricing precondition.
    let has_wizard_pricing = campaign
        .wizard_data
        .as_ref()
        .and_then(|doc| WizardData::from_value(doc).ok())
        .map(|w| w.has_pricing())
        .unwrap_or(false);

    Ok(StatusChangeContext {
        question_count,
        approval_status,
        has_budget: campaign.total_budget.is_some(),
        has_wizard_pricing,
    })
}

// ---------------------------------------------------------------------------
// GET /campaigns/{id}/status
// ---------------------------------------------------------------------------

/// Status summary for a campaign.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub current_status: &'static str,
    pub available_transitions: Vec<&'static str>,
    pub can_start: bool,
}

/// Current status, the transitions valid from it, and launch readiness.
pub async fn get_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;
    let current = CampaignStatus::from_str_db(&campaign.status)?;
    let ctx = status_context(&state.pool, &campaign).await?;

    let response = StatusResponse {
        current_status: current.as_str(),
        available_transitions: available_transitions(current, &ctx)
            .into_iter()
            .map(CampaignStatus::as_str)
            .collect(),
        can_start: can_start(&ctx),
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// PATCH /campaigns/{id}/status
// ---------------------------------------------------------------------------

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

/// Transition outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusResponse {
    pub previous_status: &'static str,
    pub current_status: &'static str,
    /// Linked questions touched by the activation cascade.
    pub cascaded_questions: u64,
}

/// Apply a validated status transition, then cascade question activation.
pub async fn change_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(body): Json<ChangeStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;
    let current = CampaignStatus::from_str_db(&campaign.status)?;
    let requested = CampaignStatus::from_str_db(&body.status)?;

    let ctx = status_context(&state.pool, &campaign).await?;
    validate_status_change(current, requested, &ctx)?;

    // Same-state request: valid, but nothing to write.
    if current == requested {
        return Ok(Json(DataResponse {
            data: ChangeStatusResponse {
                previous_status: current.as_str(),
                current_status: current.as_str(),
                cascaded_questions: 0,
            },
        }));
    }

    CampaignRepo::set_status(&state.pool, campaign.id, requested.as_str()).await?;
    tracing::info!(
        campaign_id = campaign.id,
        from = current.as_str(),
        to = requested.as_str(),
        "Campaign status changed",
    );

    // Best effort: the status change above is already committed, so a
    // cascade failure is logged rather than unwound.
    let mut cascaded = 0;
    if let Some(activation) = question_cascade(requested) {
        match QuestionRepo::set_status_for_campaign(&state.pool, campaign.id, activation.as_str())
            .await
        {
            Ok(count) => cascaded = count,
            Err(err) => {
                tracing::warn!(
                    campaign_id = campaign.id,
                    error = %err,
                    "Question activation cascade failed",
                );
            }
        }
    }

    Ok(Json(DataResponse {
        data: ChangeStatusResponse {
            previous_status: current.as_str(),
            current_status: requested.as_str(),
            cascaded_questions: cascaded,
        },
    }))
}
