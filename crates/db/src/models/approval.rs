//! Campaign approval audit-trail models.

use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaign_approvals` table. Append-only;
/// `campaigns.approval_status` denormalizes the latest row's status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignApproval {
    pub id: DbId,
    pub campaign_id: DbId,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an approval decision.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApproval {
    pub campaign_id: DbId,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub notes: Option<String>,
}
