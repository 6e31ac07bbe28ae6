//! Handlers for ad-hoc pricing calculation and full quotes.
//!
//! Both endpoints price a caller-supplied question set against the live
//! pricing configuration; nothing is persisted here.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::fees::{compose_quote, QualityRules, QuoteOptions};
use canvass_core::pricing::{
    price_campaign, resolve_rules, ComplexitySource, CostOfLivingSource, PricingContext,
    QuestionInput, RuleBook, RuleSource, TaskTypeSource, Urgency,
};
use canvass_db::models::pricing_config::PricingConfigBundle;
use canvass_db::repositories::PricingConfigRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rule book construction
// ---------------------------------------------------------------------------

/// Map the loaded configuration rows into core resolver inputs and build
/// the rule book for one calculation.
pub fn rule_book_from(bundle: &PricingConfigBundle) -> RuleBook {
    let rules: Vec<RuleSource> = bundle
        .rules
        .iter()
        .map(|r| RuleSource {
            question_type: r.question_type.clone(),
            base_price_per_answer: r.base_price_per_answer,
            base_cost_per_answer: r.base_cost_per_answer,
            multiplier_factors: r.multiplier_factors.clone(),
        })
        .collect();

    let complexity: Vec<ComplexitySource> = bundle
        .complexity
        .iter()
        .map(|c| ComplexitySource {
            difficulty_level: c.difficulty_level.clone(),
            multiplier_value: c.multiplier_value,
        })
        .collect();

    let cost_of_living: Vec<CostOfLivingSource> = bundle
        .cost_of_living
        .iter()
        .map(|c| CostOfLivingSource {
            country_code: c.country_code.clone(),
            currency: c.currency.clone(),
            multiplier: c.multiplier,
        })
        .collect();

    let task_types: Vec<TaskTypeSource> = bundle
        .task_types
        .iter()
        .map(|t| TaskTypeSource {
            task_type: t.task_type.clone(),
            base_cost_multiplier: t.base_cost_multiplier,
        })
        .collect();

    resolve_rules(&rules, &complexity, &cost_of_living, &task_types)
}

// ---------------------------------------------------------------------------
// POST /pricing/calculate — operational pricing summary
// ---------------------------------------------------------------------------

/// Request body for an ad-hoc pricing calculation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub questions: Vec<QuestionInput>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub target_country: Option<String>,
    #[serde(default)]
    pub demographic_filter_count: u32,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CalculateRequest {
    fn context(&self) -> PricingContext {
        PricingContext {
            urgency: self
                .urgency
                .as_deref()
                .map(Urgency::from_str_lenient)
                .unwrap_or_default(),
            target_country: self.target_country.clone(),
            demographic_filter_count: self.demographic_filter_count,
            currency: self.currency.clone().unwrap_or_else(|| "USD".to_string()),
        }
    }
}

/// Price a question set and return the operational summary.
pub async fn calculate(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<CalculateRequest>,
) -> AppResult<impl IntoResponse> {
    if body.questions.is_empty() {
        return Err(AppError::BadRequest("questions must not be empty".into()));
    }

    let bundle = PricingConfigRepo::load_bundle(&state.pool).await?;
    let book = rule_book_from(&bundle);

    let summary = price_campaign(&book, &body.questions, &body.context())?;
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// POST /pricing/quote — full quote with fee components
// ---------------------------------------------------------------------------

/// Request body for a full campaign quote.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub questions: Vec<QuestionInput>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub target_country: Option<String>,
    #[serde(default)]
    pub demographic_filter_count: u32,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub number_of_respondents: i64,
    #[serde(default)]
    pub reward_budget: f64,
    #[serde(default)]
    pub quality_rules: Option<QualityRules>,
    #[serde(default)]
    pub analytics_dashboard: bool,
    #[serde(default)]
    pub fine_tuning_dataset_size: Option<i64>,
}

/// Price a question set and compose the full quote on top of it.
pub async fn quote(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<QuoteRequest>,
) -> AppResult<impl IntoResponse> {
    if body.questions.is_empty() {
        return Err(AppError::BadRequest("questions must not be empty".into()));
    }

    let urgency = body
        .urgency
        .as_deref()
        .map(Urgency::from_str_lenient)
        .unwrap_or_default();

    let ctx = PricingContext {
        urgency,
        target_country: body.target_country.clone(),
        demographic_filter_count: body.demographic_filter_count,
        currency: body.currency.clone().unwrap_or_else(|| "USD".to_string()),
    };

    let bundle = PricingConfigRepo::load_bundle(&state.pool).await?;
    let book = rule_book_from(&bundle);
    let summary = price_campaign(&book, &body.questions, &ctx)?;

    let total_responses: i64 = body
        .questions
        .iter()
        .map(|q| i64::from(q.required_responses.max(0)))
        .sum();

    let opts = QuoteOptions {
        number_of_respondents: body.number_of_respondents,
        reward_budget: body.reward_budget,
        quality_rules: body.quality_rules.clone(),
        analytics_dashboard: body.analytics_dashboard,
        fine_tuning_dataset_size: body.fine_tuning_dataset_size,
    };

    let quote = compose_quote(summary, urgency, total_responses, &opts);
    Ok(Json(DataResponse { data: quote }))
}
