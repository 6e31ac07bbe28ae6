//! Repository for the `campaign_questions` link table.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CampaignQuestion, CreateCampaignQuestion};

/// Column list for campaign-question queries.
const COLUMNS: &str = "\
    id, campaign_id, question_id, question_type, complexity_level, \
    required_responses, base_price_per_answer, created_at";

/// Provides link operations between campaigns and questions.
pub struct CampaignQuestionRepo;

impl CampaignQuestionRepo {
    /// Link a question to a campaign, freezing the base price at link time.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCampaignQuestion,
    ) -> Result<CampaignQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_questions
                (campaign_id, question_id, question_type, complexity_level,
                 required_responses, base_price_per_answer)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignQuestion>(&query)
            .bind(input.campaign_id)
            .bind(input.question_id)
            .bind(&input.question_type)
            .bind(&input.complexity_level)
            .bind(input.required_responses)
            .bind(input.base_price_per_answer)
            .fetch_one(pool)
            .await
    }

    /// List all question links for a campaign in link order.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_questions
             WHERE campaign_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, CampaignQuestion>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Count the questions linked to a campaign.
    pub async fn count_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM campaign_questions WHERE campaign_id = $1")
            .bind(campaign_id)
            .fetch_one(pool)
            .await
    }
}
