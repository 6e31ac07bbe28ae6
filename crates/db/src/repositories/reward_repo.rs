//! Repositories for reward configuration, quality rules, and campaign
//! versions.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::reward::{CampaignQualityRules, CampaignRewardConfig, CampaignVersion};

const REWARD_COLUMNS: &str =
    "id, campaign_id, reward_per_response, reward_type, created_at, updated_at";

const QUALITY_COLUMNS: &str = "\
    id, campaign_id, validation_layers, geo_verification, ai_scoring, \
    created_at, updated_at";

const VERSION_COLUMNS: &str = "id, campaign_id, version_number, wizard_snapshot, created_at";

/// Upsert access to per-campaign reward configuration.
pub struct RewardConfigRepo;

impl RewardConfigRepo {
    /// Insert or replace the campaign's reward configuration.
    pub async fn upsert(
        pool: &PgPool,
        campaign_id: DbId,
        reward_per_response: f64,
        reward_type: &str,
    ) -> Result<CampaignRewardConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_reward_configs (campaign_id, reward_per_response, reward_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (campaign_id) DO UPDATE
                 SET reward_per_response = EXCLUDED.reward_per_response,
                     reward_type = EXCLUDED.reward_type,
                     updated_at = NOW()
             RETURNING {REWARD_COLUMNS}"
        );
        sqlx::query_as::<_, CampaignRewardConfig>(&query)
            .bind(campaign_id)
            .bind(reward_per_response)
            .bind(reward_type)
            .fetch_one(pool)
            .await
    }
}

/// Upsert access to per-campaign quality rules.
pub struct QualityRulesRepo;

impl QualityRulesRepo {
    /// Insert or replace the campaign's quality rules.
    pub async fn upsert(
        pool: &PgPool,
        campaign_id: DbId,
        validation_layers: &serde_json::Value,
        geo_verification: bool,
        ai_scoring: bool,
    ) -> Result<CampaignQualityRules, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_quality_rules
                (campaign_id, validation_layers, geo_verification, ai_scoring)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (campaign_id) DO UPDATE
                 SET validation_layers = EXCLUDED.validation_layers,
                     geo_verification = EXCLUDED.geo_verification,
                     ai_scoring = EXCLUDED.ai_scoring,
                     updated_at = NOW()
             RETURNING {QUALITY_COLUMNS}"
        );
        sqlx::query_as::<_, CampaignQualityRules>(&query)
            .bind(campaign_id)
            .bind(validation_layers)
            .bind(geo_verification)
            .bind(ai_scoring)
            .fetch_one(pool)
            .await
    }
}

/// Append-only access to campaign wizard-snapshot versions.
pub struct CampaignVersionRepo;

impl CampaignVersionRepo {
    /// Append a version record with the next sequential version number.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        wizard_snapshot: &serde_json::Value,
    ) -> Result<CampaignVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_versions (campaign_id, version_number, wizard_snapshot)
             SELECT $1, COALESCE(MAX(version_number), 0) + 1, $2
             FROM campaign_versions WHERE campaign_id = $1
             RETURNING {VERSION_COLUMNS}"
        );
        sqlx::query_as::<_, CampaignVersion>(&query)
            .bind(campaign_id)
            .bind(wizard_snapshot)
            .fetch_one(pool)
            .await
    }

    /// List version records for a campaign, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM campaign_versions
             WHERE campaign_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, CampaignVersion>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
