//! Reward configuration, quality rules, and campaign version models.

use canvass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `campaign_reward_configs`. One per campaign, upserted by
/// finalize.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignRewardConfig {
    pub id: DbId,
    pub campaign_id: DbId,
    pub reward_per_response: f64,
    pub reward_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `campaign_quality_rules`. One per campaign, upserted by
/// finalize.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignQualityRules {
    pub id: DbId,
    pub campaign_id: DbId,
    pub validation_layers: serde_json::Value,
    pub geo_verification: bool,
    pub ai_scoring: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `campaign_versions`: an append-only audit snapshot of the
/// wizard staging document, separate from pricing snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignVersion {
    pub id: DbId,
    pub campaign_id: DbId,
    pub version_number: i32,
    pub wizard_snapshot: serde_json::Value,
    pub created_at: Timestamp,
}
