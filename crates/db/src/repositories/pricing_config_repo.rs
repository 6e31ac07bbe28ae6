//! Read-only access to the four pricing factor tables.
//!
//! The tables are admin-managed elsewhere; this engine only ever loads
//! the currently active rows, all four sets together, for one resolution
//! pass.

use sqlx::PgPool;

use crate::models::pricing_config::{
    ComplexityConfig, CostOfLivingMultiplier, PricingConfigBundle, PricingRule, TaskTypeConfig,
};

const RULE_COLUMNS: &str = "\
    id, question_type, base_price_per_answer, base_cost_per_answer, \
    multiplier_factors, is_active, created_at, updated_at";

const COMPLEXITY_COLUMNS: &str =
    "id, difficulty_level, multiplier_value, ai_assistance_threshold, is_active";

const COL_COLUMNS: &str = "id, country_code, currency, multiplier";

const TASK_TYPE_COLUMNS: &str = "id, task_type, base_cost_multiplier, is_active";

/// Read-only repository over the pricing configuration tables.
pub struct PricingConfigRepo;

impl PricingConfigRepo {
    /// Load all active pricing rules. Inactive rules are historical and
    /// excluded from resolution.
    pub async fn list_active_rules(pool: &PgPool) -> Result<Vec<PricingRule>, sqlx::Error> {
        let query = format!(
            "SELECT {RULE_COLUMNS} FROM pricing_rules WHERE is_active ORDER BY question_type"
        );
        sqlx::query_as::<_, PricingRule>(&query).fetch_all(pool).await
    }

    /// Load all active complexity configs.
    pub async fn list_active_complexity(
        pool: &PgPool,
    ) -> Result<Vec<ComplexityConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLEXITY_COLUMNS} FROM complexity_configs WHERE is_active
             ORDER BY difficulty_level"
        );
        sqlx::query_as::<_, ComplexityConfig>(&query)
            .fetch_all(pool)
            .await
    }

    /// Load all cost-of-living multipliers.
    pub async fn list_cost_of_living(
        pool: &PgPool,
    ) -> Result<Vec<CostOfLivingMultiplier>, sqlx::Error> {
        let query = format!(
            "SELECT {COL_COLUMNS} FROM cost_of_living_multipliers
             ORDER BY country_code, currency"
        );
        sqlx::query_as::<_, CostOfLivingMultiplier>(&query)
            .fetch_all(pool)
            .await
    }

    /// Load all active task-type configs.
    pub async fn list_active_task_types(
        pool: &PgPool,
    ) -> Result<Vec<TaskTypeConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_TYPE_COLUMNS} FROM task_type_configs WHERE is_active ORDER BY task_type"
        );
        sqlx::query_as::<_, TaskTypeConfig>(&query)
            .fetch_all(pool)
            .await
    }

    /// Load all four active-row sets for one resolution pass.
    pub async fn load_bundle(pool: &PgPool) -> Result<PricingConfigBundle, sqlx::Error> {
        Ok(PricingConfigBundle {
            rules: Self::list_active_rules(pool).await?,
            complexity: Self::list_active_complexity(pool).await?,
            cost_of_living: Self::list_cost_of_living(pool).await?,
            task_types: Self::list_active_task_types(pool).await?,
        })
    }
}
