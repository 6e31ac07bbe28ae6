//! Insert-only repository for the `campaign_pricing_snapshots` table.
//!
//! Snapshots are immutable history: no update or delete method exists on
//! this type, and none may be added. "Current" pricing is always a query
//! for the most recent row, never a stored pointer.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::snapshot::{CampaignPricingSnapshot, CreateSnapshot};

/// Column list for snapshot queries.
const COLUMNS: &str = "\
    id, campaign_id, estimated_total_cost, estimated_total_revenue, \
    estimated_margin, currency, breakdown, created_at";

/// Append and read pricing snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Append a snapshot, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSnapshot,
    ) -> Result<CampaignPricingSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_pricing_snapshots
                (campaign_id, estimated_total_cost, estimated_total_revenue,
                 estimated_margin, currency, breakdown)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignPricingSnapshot>(&query)
            .bind(input.campaign_id)
            .bind(input.estimated_total_cost)
            .bind(input.estimated_total_revenue)
            .bind(input.estimated_margin)
            .bind(&input.currency)
            .bind(&input.breakdown)
            .fetch_one(pool)
            .await
    }

    /// The campaign's current pricing: most recent snapshot by creation
    /// time.
    pub async fn latest_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Option<CampaignPricingSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_pricing_snapshots
             WHERE campaign_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CampaignPricingSnapshot>(&query)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Full snapshot history for a campaign, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignPricingSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_pricing_snapshots
             WHERE campaign_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CampaignPricingSnapshot>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Count snapshots for a campaign (approval precondition input).
    pub async fn count_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM campaign_pricing_snapshots WHERE campaign_id = $1",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await
    }
}
