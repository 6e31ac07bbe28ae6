//! Pricing snapshot model.

use canvass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `campaign_pricing_snapshots` table.
///
/// Append-only history of every pricing calculation. The "current" price
/// of a campaign is the most recently created row; there is no back
/// pointer from the campaign.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignPricingSnapshot {
    pub id: DbId,
    pub campaign_id: DbId,
    pub estimated_total_cost: f64,
    pub estimated_total_revenue: f64,
    /// Margin as a percentage of revenue.
    pub estimated_margin: f64,
    pub currency: String,
    /// Full breakdown-line array plus the validation verdict, stored as
    /// one opaque document.
    pub breakdown: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a snapshot.
#[derive(Debug, Clone)]
pub struct CreateSnapshot {
    pub campaign_id: DbId,
    pub estimated_total_cost: f64,
    pub estimated_total_revenue: f64,
    pub estimated_margin: f64,
    pub currency: String,
    pub breakdown: serde_json::Value,
}
