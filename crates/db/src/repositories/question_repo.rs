//! Repository for the `questions` table.

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

/// Column list for question queries.
const COLUMNS: &str = "id, title, question_type, options, status, created_at, updated_at";

/// Provides operations for durable question entities.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row. Questions start
    /// inactive; the lifecycle cascade activates them when their campaign
    /// starts running.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (title, question_type, options)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(&input.title)
            .bind(&input.question_type)
            .bind(&input.options)
            .fetch_one(pool)
            .await
    }

    /// Find a question by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk-set the status of every question linked to a campaign.
    /// Returns the number of questions updated.
    pub async fn set_status_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE questions
             SET status = $2, updated_at = NOW()
             WHERE id IN (
                 SELECT question_id FROM campaign_questions WHERE campaign_id = $1
             )",
        )
        .bind(campaign_id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
