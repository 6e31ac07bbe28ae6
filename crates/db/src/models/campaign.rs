//! Campaign row and DTOs.

use canvass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
///
/// `status` and `approval_status` are stored as strings and parsed into
/// the core enums at the handler boundary; they are only ever written
/// through the two state machines.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub status: String,
    pub approval_status: String,
    pub total_budget: Option<f64>,
    pub reward_budget: Option<f64>,
    pub setup_fee: Option<f64>,
    pub validation_fee: Option<f64>,
    pub analytics_fee: Option<f64>,
    pub fine_tuning_fee: Option<f64>,
    pub currency: String,
    pub number_of_respondents: Option<i64>,
    /// Ephemeral staging document; null once a campaign no longer needs it.
    pub wizard_data: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub title: String,
    pub total_budget: Option<f64>,
    pub wizard_data: Option<serde_json::Value>,
}

/// Derived pricing fields written back onto the campaign row by finalize.
/// Totals and fee components come from the composed campaign quote.
#[derive(Debug, Clone)]
pub struct CampaignPricingFields {
    pub total_budget: f64,
    pub reward_budget: f64,
    pub setup_fee: f64,
    pub validation_fee: f64,
    pub analytics_fee: f64,
    pub fine_tuning_fee: f64,
    pub number_of_respondents: i64,
}
