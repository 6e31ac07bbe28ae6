//! Campaign lifecycle state machine.
//!
//! Operational status (`draft -> running -> completed -> archived`) is one
//! of two independent axes gating a campaign; the other is the approval
//! workflow in [`crate::approval`]. Transition validation is pure; the
//! question activation/deactivation cascade is described here but executed
//! best-effort by the API layer.

use serde::{Deserialize, Serialize};

use crate::approval::ApprovalStatus;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Operational campaign status. `Archived` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Running,
    Completed,
    Archived,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(CoreError::Validation(format!(
                "Invalid campaign status '{s}'. Must be one of: draft, running, completed, archived"
            ))),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }
}

/// All statuses, in lifecycle order.
pub const ALL_STATUSES: &[CampaignStatus] = &[
    CampaignStatus::Draft,
    CampaignStatus::Running,
    CampaignStatus::Completed,
    CampaignStatus::Archived,
];

// ---------------------------------------------------------------------------
// Transition context
// ---------------------------------------------------------------------------

/// Campaign facts read before validating a transition.
#[derive(Debug, Clone)]
pub struct StatusChangeContext {
    /// Number of linked campaign questions.
    pub question_count: i64,
    /// Current approval-workflow state.
    pub approval_status: ApprovalStatus,
    /// Whether `total_budget` is set on the campaign row.
    pub has_budget: bool,
    /// Whether the wizard document carries a pricing object.
    pub has_wizard_pricing: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a requested status transition.
///
/// Same-state requests are a no-op and always valid. Backward moves and
/// moves out of `archived` are rejected. `draft -> running` additionally
/// requires questions, approval, and a budget source; the first failing
/// condition's message is returned.
pub fn validate_status_change(
    current: CampaignStatus,
    requested: CampaignStatus,
    ctx: &StatusChangeContext,
) -> Result<(), CoreError> {
    use CampaignStatus::*;

    if current == requested {
        return Ok(());
    }

    if current.is_terminal() {
        return Err(CoreError::Validation(format!(
            "Campaign is archived; no further status changes are allowed (requested '{}')",
            requested.as_str()
        )));
    }

    match (current, requested) {
        (Running, Draft) | (Completed, Draft) | (Completed, Running) => {
            Err(CoreError::Validation(format!(
                "Cannot move a {} campaign back to {}",
                current.as_str(),
                requested.as_str()
            )))
        }
        (Draft, Running) => start_preconditions(ctx),
        // draft->completed, draft->archived, running->completed,
        // running->archived, completed->archived
        _ => Ok(()),
    }
}

/// The three launch preconditions, checked in order.
fn start_preconditions(ctx: &StatusChangeContext) -> Result<(), CoreError> {
    if ctx.question_count == 0 {
        return Err(CoreError::Validation(
            "Cannot start campaign: no questions are linked. Finalize the campaign first"
                .to_string(),
        ));
    }
    if ctx.approval_status != ApprovalStatus::Approved {
        return Err(CoreError::Validation(format!(
            "Cannot start campaign: approval status is '{}', must be 'approved'",
            ctx.approval_status.as_str()
        )));
    }
    if !ctx.has_budget && !ctx.has_wizard_pricing {
        return Err(CoreError::Validation(
            "Cannot start campaign: no budget is set and no pricing exists in the draft"
                .to_string(),
        ));
    }
    Ok(())
}

/// Whether all `draft -> running` preconditions currently hold.
pub fn can_start(ctx: &StatusChangeContext) -> bool {
    start_preconditions(ctx).is_ok()
}

/// Statuses reachable from `current` given the campaign context.
pub fn available_transitions(
    current: CampaignStatus,
    ctx: &StatusChangeContext,
) -> Vec<CampaignStatus> {
    ALL_STATUSES
        .iter()
        .copied()
        .filter(|&next| next != current && validate_status_change(current, next, ctx).is_ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Question cascade
// ---------------------------------------------------------------------------

/// Linked-question status implied by a campaign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionActivation {
    Active,
    Inactive,
}

impl QuestionActivation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Cascade to apply to linked questions when entering a status.
/// `None` means the cascade leaves questions untouched.
pub fn question_cascade(entering: CampaignStatus) -> Option<QuestionActivation> {
    match entering {
        CampaignStatus::Running => Some(QuestionActivation::Active),
        CampaignStatus::Completed | CampaignStatus::Archived => {
            Some(QuestionActivation::Inactive)
        }
        CampaignStatus::Draft => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
