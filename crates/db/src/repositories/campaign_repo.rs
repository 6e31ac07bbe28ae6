//! Repository for the `campaigns` table.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CampaignPricingFields, CreateCampaign};

/// Column list for campaign queries.
const COLUMNS: &str = "\
    id, owner_id, title, status, approval_status, total_budget, \
    reward_budget, setup_fee, validation_fee, analytics_fee, \
    fine_tuning_fee, currency, number_of_respondents, wizard_data, \
    created_at, updated_at";

/// Provides CRUD operations for campaigns.
///
/// `status` and `approval_status` are deliberately not part of the
/// generic update surface; they change only through [`set_status`] and
/// [`set_approval_status`], which the state-machine handlers call after
/// validation.
///
/// [`set_status`]: CampaignRepo::set_status
/// [`set_approval_status`]: CampaignRepo::set_approval_status
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new draft campaign, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (owner_id, title, total_budget, wizard_data)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(input.total_budget)
            .bind(&input.wizard_data)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write a validated operational status. Returns false if the campaign
    /// no longer exists.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write the denormalized approval status pointer.
    pub async fn set_approval_status(
        pool: &PgPool,
        id: DbId,
        approval_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns SET approval_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(approval_status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reassert both state axes at once. Used by finalize to pin a draft
    /// campaign at draft/draft explicitly.
    pub async fn set_both_statuses(
        pool: &PgPool,
        id: DbId,
        status: &str,
        approval_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns
             SET status = $2, approval_status = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(approval_status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write derived pricing fields back onto the campaign row.
    pub async fn set_pricing_fields(
        pool: &PgPool,
        id: DbId,
        fields: &CampaignPricingFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns
             SET total_budget = $2, reward_budget = $3, setup_fee = $4,
                 validation_fee = $5, analytics_fee = $6, fine_tuning_fee = $7,
                 number_of_respondents = $8, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(fields.total_budget)
        .bind(fields.reward_budget)
        .bind(fields.setup_fee)
        .bind(fields.validation_fee)
        .bind(fields.analytics_fee)
        .bind(fields.fine_tuning_fee)
        .bind(fields.number_of_respondents)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
