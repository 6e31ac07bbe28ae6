//! Campaign finalizer: converts the wizard staging document into durable
//! entities.
//!
//! Only two things abort a finalize: an auth/ownership failure and a
//! campaign with no wizard document. Every other sub-step failure is
//! collected as an ordered warning string so one malformed question or one
//! failed write never discards the rest of the submission.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use canvass_core::error::CoreError;
use canvass_core::fees::{compose_quote, QuoteOptions};
use canvass_core::pricing::{price_campaign, PricingContext, QuestionInput};
use canvass_core::types::DbId;
use canvass_core::wizard::{normalize_question, WizardData};
use canvass_db::models::campaign::CampaignPricingFields;
use canvass_db::models::question::{CreateCampaignQuestion, CreateQuestion};
use canvass_db::models::snapshot::CreateSnapshot;
use canvass_db::repositories::{
    CampaignQuestionRepo, CampaignRepo, CampaignVersionRepo, PricingConfigRepo, QualityRulesRepo,
    QuestionRepo, RewardConfigRepo, SnapshotRepo,
};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::campaign::load_owned_campaign;
use crate::handlers::pricing::rule_book_from;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default reward type when the wizard's reward section omits one.
const DEFAULT_REWARD_TYPE: &str = "cash";

/// Finalize outcome: how many questions were created plus everything that
/// was skipped or failed along the way, in encounter order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub created_questions: i64,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// POST /campaigns/{id}/finalize
// ---------------------------------------------------------------------------

/// Convert the campaign's wizard document into durable entities.
pub async fn finalize_campaign(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let campaign = load_owned_campaign(&state.pool, &user, id).await?;

    let Some(doc) = campaign.wizard_data.clone() else {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign has no wizard data to finalize".to_string(),
        )));
    };
    let wizard = WizardData::from_value(&doc)?;

    let mut warnings: Vec<String> = Vec::new();

    let bundle = PricingConfigRepo::load_bundle(&state.pool).await?;
    let book = rule_book_from(&bundle);

    // -- Stage 1: normalize and persist questions --

    let mut created: i64 = 0;
    let mut priced_questions: Vec<QuestionInput> = Vec::new();

    for (index, raw) in wizard.questions.iter().enumerate() {
        let normalized = match normalize_question(index, raw) {
            Ok(q) => q,
            Err(warning) => {
                warnings.push(warning);
                continue;
            }
        };

        let type_str = normalized.question_type.as_str();
        let base_price = match book.get(type_str) {
            Ok(rule) => rule.base_price,
            Err(_) => {
                warnings.push(format!(
                    "Question {}: no active pricing rule for '{}', skipped",
                    index + 1,
                    type_str
                ));
                continue;
            }
        };

        let question = match QuestionRepo::create(
            &state.pool,
            &CreateQuestion {
                title: normalized.title.clone(),
                question_type: type_str.to_string(),
                options: normalized.options.clone(),
            },
        )
        .await
        {
            Ok(q) => q,
            Err(err) => {
                warnings.push(format!("Question {}: could not be saved ({err})", index + 1));
                continue;
            }
        };

        if let Err(err) = CampaignQuestionRepo::create(
            &state.pool,
            &CreateCampaignQuestion {
                campaign_id: campaign.id,
                question_id: question.id,
                question_type: type_str.to_string(),
                complexity_level: normalized.complexity_level.clone(),
                required_responses: normalized.required_responses,
                base_price_per_answer: base_price,
            },
        )
        .await
        {
            warnings.push(format!(
                "Question {}: could not be linked to the campaign ({err})",
                index + 1
            ));
            continue;
        }

        created += 1;
        priced_questions.push(QuestionInput {
            question_type: type_str.to_string(),
            complexity_level: normalized.complexity_level,
            required_responses: normalized.required_responses,
        });
    }

    if priced_questions.is_empty() {
        warnings.push("No questions found in wizard data".to_string());
    }

    // -- Stage 2: price, compose the full quote, snapshot --

    match (priced_questions.is_empty(), wizard.number_of_respondents) {
        (false, Some(respondents)) => {
            let urgency = wizard.urgency();
            let ctx = PricingContext {
                urgency,
                target_country: wizard.target_country(),
                demographic_filter_count: wizard.demographic_filter_count(),
                currency: campaign.currency.clone(),
            };

            match price_campaign(&book, &priced_questions, &ctx) {
                Ok(summary) => {
                    let total_responses: i64 = priced_questions
                        .iter()
                        .map(|q| i64::from(q.required_responses))
                        .sum();
                    let opts = QuoteOptions {
                        number_of_respondents: respondents,
                        reward_budget: wizard.reward_budget(),
                        quality_rules: wizard
                            .quality_rules
                            .as_ref()
                            .map(|q| q.to_quality_rules()),
                        analytics_dashboard: wizard.analytics_dashboard.unwrap_or(false),
                        fine_tuning_dataset_size: wizard.fine_tuning_dataset,
                    };
                    let quote = compose_quote(summary, urgency, total_responses, &opts);

                    let snapshot = CreateSnapshot {
                        campaign_id: campaign.id,
                        estimated_total_cost: quote.total_cost,
                        estimated_total_revenue: quote.total_revenue,
                        estimated_margin: quote.margin_percentage,
                        currency: quote.currency.clone(),
                        breakdown: json!({
                            "breakdown": quote.operational.breakdown,
                            "validation": quote.validation,
                            "fees": {
                                "setupFee": quote.setup_fee,
                                "perResponseFee": quote.per_response_fee,
                                "validationFee": quote.validation_fee,
                                "analyticsFee": quote.analytics_fee,
                                "fineTuningFee": quote.fine_tuning_fee,
                                "rewardBudget": quote.reward_budget,
                            },
                        }),
                    };
                    if let Err(err) = SnapshotRepo::create(&state.pool, &snapshot).await {
                        warnings.push(format!("Pricing snapshot could not be saved ({err})"));
                    }

                    let fields = CampaignPricingFields {
                        total_budget: quote.total_revenue,
                        reward_budget: quote.reward_budget,
                        setup_fee: quote.setup_fee,
                        validation_fee: quote.validation_fee,
                        analytics_fee: quote.analytics_fee,
                        fine_tuning_fee: quote.fine_tuning_fee,
                        number_of_respondents: respondents,
                    };
                    if let Err(err) =
                        CampaignRepo::set_pricing_fields(&state.pool, campaign.id, &fields).await
                    {
                        warnings.push(format!("Campaign pricing fields were not updated ({err})"));
                    }
                }
                Err(err) => {
                    warnings.push(format!("Pricing failed: {err}"));
                }
            }
        }
        (false, None) => {
            warnings.push("No respondent count in wizard data; pricing skipped".to_string());
        }
        (true, _) => {}
    }

    // -- Stage 3: reward config and quality rules, independently --

    if let Some(rewards) = &wizard.rewards {
        if let Some(per_response) = rewards.reward_per_response {
            let reward_type = rewards.reward_type.as_deref().unwrap_or(DEFAULT_REWARD_TYPE);
            if let Err(err) =
                RewardConfigRepo::upsert(&state.pool, campaign.id, per_response, reward_type).await
            {
                warnings.push(format!("Reward configuration was not saved ({err})"));
            }
        }
    }

    if let Some(quality) = &wizard.quality_rules {
        let rules = quality.to_quality_rules();
        if let Err(err) = QualityRulesRepo::upsert(
            &state.pool,
            campaign.id,
            &json!(rules.validation_layers),
            rules.geo_verification,
            rules.ai_scoring,
        )
        .await
        {
            warnings.push(format!("Quality rules were not saved ({err})"));
        }
    }

    // -- Stage 4: version audit record --

    if let Err(err) = CampaignVersionRepo::create(&state.pool, campaign.id, &doc).await {
        warnings.push(format!("Campaign version record was not saved ({err})"));
    }

    // -- Stage 5: reassert draft/draft while still in draft --

    if campaign.status == "draft" {
        if let Err(err) =
            CampaignRepo::set_both_statuses(&state.pool, campaign.id, "draft", "draft").await
        {
            warnings.push(format!("Campaign status was not reasserted ({err})"));
        }
    }

    tracing::info!(
        campaign_id = campaign.id,
        created_questions = created,
        warning_count = warnings.len(),
        "Campaign finalized",
    );

    Ok(Json(DataResponse {
        data: FinalizeResponse {
            created_questions: created,
            warnings,
        },
    }))
}
