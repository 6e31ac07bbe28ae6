//! Question and campaign-question link models.

use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub title: String,
    pub question_type: String,
    pub options: Option<serde_json::Value>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub title: String,
    pub question_type: String,
    pub options: Option<serde_json::Value>,
}

/// A row from the `campaign_questions` link table.
///
/// `base_price_per_answer` is frozen at link time from the then-active
/// pricing rule; later rule edits never change an existing link.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignQuestion {
    pub id: DbId,
    pub campaign_id: DbId,
    pub question_id: DbId,
    pub question_type: String,
    pub complexity_level: String,
    pub required_responses: i32,
    pub base_price_per_answer: f64,
    pub created_at: Timestamp,
}

/// DTO for linking a question to a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaignQuestion {
    pub campaign_id: DbId,
    pub question_id: DbId,
    pub question_type: String,
    pub complexity_level: String,
    pub required_responses: i32,
    pub base_price_per_answer: f64,
}
