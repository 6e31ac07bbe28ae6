//! Rows from the four admin-managed pricing factor tables.
//!
//! These are read-only inputs to the engine; their CRUD lives in the admin
//! surface, not here.

use canvass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `pricing_rules`. One active rule per question type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingRule {
    pub id: DbId,
    pub question_type: String,
    pub base_price_per_answer: f64,
    pub base_cost_per_answer: f64,
    pub multiplier_factors: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `complexity_configs`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplexityConfig {
    pub id: DbId,
    pub difficulty_level: String,
    pub multiplier_value: f64,
    pub ai_assistance_threshold: Option<f64>,
    pub is_active: bool,
}

/// A row from `cost_of_living_multipliers`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CostOfLivingMultiplier {
    pub id: DbId,
    pub country_code: String,
    pub currency: String,
    pub multiplier: f64,
}

/// A row from `task_type_configs`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskTypeConfig {
    pub id: DbId,
    pub task_type: String,
    pub base_cost_multiplier: f64,
    pub is_active: bool,
}

/// The four active-row sets loaded together for one resolution pass.
#[derive(Debug, Clone)]
pub struct PricingConfigBundle {
    pub rules: Vec<PricingRule>,
    pub complexity: Vec<ComplexityConfig>,
    pub cost_of_living: Vec<CostOfLivingMultiplier>,
    pub task_types: Vec<TaskTypeConfig>,
}
