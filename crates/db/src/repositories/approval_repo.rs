//! Insert-only repository for the `campaign_approvals` table.
//!
//! The approval trail is an append-only audit log; history is never
//! rewritten, so no update or delete method exists here.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::approval::{CampaignApproval, CreateApproval};

/// Column list for approval queries.
const COLUMNS: &str = "id, campaign_id, status, reviewed_by, notes, created_at";

/// Append and read approval decisions.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Append an approval decision, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApproval,
    ) -> Result<CampaignApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_approvals (campaign_id, status, reviewed_by, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignApproval>(&query)
            .bind(input.campaign_id)
            .bind(&input.status)
            .bind(input.reviewed_by)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Full approval history for a campaign, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_approvals
             WHERE campaign_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CampaignApproval>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
