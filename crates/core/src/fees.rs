//! Campaign-level fee composition on top of the per-question calculator.
//!
//! Wraps a [`PricingSummary`] with flat and scaled fee components (setup,
//! validation, analytics, fine-tuning) plus the reward budget to produce a
//! full campaign quote. Each component is independently computable; the
//! composite totals reuse the same margin thresholds as the base
//! calculator.

use serde::{Deserialize, Serialize};

use crate::pricing::{margin_percentage, margin_verdict, PricingSummary, Urgency};

// ---------------------------------------------------------------------------
// Fee constants
// ---------------------------------------------------------------------------

/// Flat setup fee before urgency scaling.
pub const SETUP_FEE_BASE: f64 = 500.0;

/// Setup fee multiplier for express campaigns.
pub const EXPRESS_SETUP_MULTIPLIER: f64 = 1.3;

/// Flat validation rate per respondent before quality scaling.
pub const VALIDATION_FEE_PER_RESPONDENT: f64 = 0.5;

/// Applied when more than two validation layers are configured.
pub const MULTI_LAYER_MULTIPLIER: f64 = 1.2;

/// Applied in addition when more than three layers are configured.
pub const DEEP_LAYER_MULTIPLIER: f64 = 1.1;

/// Applied when geo verification is enabled.
pub const GEO_VERIFICATION_MULTIPLIER: f64 = 1.15;

/// Applied when AI answer scoring is enabled.
pub const AI_SCORING_MULTIPLIER: f64 = 1.25;

/// Flat analytics dashboard fee.
pub const ANALYTICS_FEE: f64 = 750.0;

/// Flat fine-tuning export fee before dataset scaling.
pub const FINE_TUNING_FEE_BASE: f64 = 1500.0;

/// Dataset size above which the fine-tuning fee scales by 1.5.
pub const LARGE_DATASET_THRESHOLD: i64 = 10_000;
pub const LARGE_DATASET_MULTIPLIER: f64 = 1.5;

/// Dataset size above which an additional 1.3 applies.
pub const HUGE_DATASET_THRESHOLD: i64 = 50_000;
pub const HUGE_DATASET_MULTIPLIER: f64 = 1.3;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Quality requirements affecting the validation fee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityRules {
    pub validation_layers: Vec<String>,
    pub geo_verification: bool,
    pub ai_scoring: bool,
}

/// Campaign-wide options for a full quote.
#[derive(Debug, Clone, Default)]
pub struct QuoteOptions {
    pub number_of_respondents: i64,
    /// Pass-through contributor reward budget. Added to total cost, never
    /// to revenue.
    pub reward_budget: f64,
    pub quality_rules: Option<QualityRules>,
    pub analytics_dashboard: bool,
    /// Dataset-size proxy; `Some` requests the fine-tuning export.
    pub fine_tuning_dataset_size: Option<i64>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Advisory discount range by campaign size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountRange {
    pub min: f64,
    pub max: f64,
}

/// Full campaign quote: operational pricing plus fee components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignQuote {
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_margin: f64,
    pub margin_percentage: f64,
    pub setup_fee: f64,
    pub per_response_fee: f64,
    pub validation_fee: f64,
    pub analytics_fee: f64,
    pub fine_tuning_fee: f64,
    pub reward_budget: f64,
    pub suggested_discount: DiscountRange,
    pub operational: PricingSummary,
    pub validation: crate::pricing::MarginVerdict,
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Fee components
// ---------------------------------------------------------------------------

/// Flat setup fee, scaled for express urgency.
pub fn setup_fee(urgency: Urgency) -> f64 {
    match urgency {
        Urgency::Express => SETUP_FEE_BASE * EXPRESS_SETUP_MULTIPLIER,
        Urgency::Standard => SETUP_FEE_BASE,
    }
}

/// Average revenue per response across the question set; 0 with no
/// responses.
pub fn per_response_fee(total_revenue: f64, total_responses: i64) -> f64 {
    if total_responses <= 0 {
        0.0
    } else {
        total_revenue / total_responses as f64
    }
}

/// Per-respondent validation fee, scaled by the quality configuration.
///
/// Multipliers compose multiplicatively, in a fixed order: layer count
/// (>2, then >3), geo verification, AI scoring.
pub fn validation_fee(number_of_respondents: i64, quality: Option<&QualityRules>) -> f64 {
    let mut fee = VALIDATION_FEE_PER_RESPONDENT * number_of_respondents.max(0) as f64;

    if let Some(quality) = quality {
        if quality.validation_layers.len() > 2 {
            fee *= MULTI_LAYER_MULTIPLIER;
        }
        if quality.validation_layers.len() > 3 {
            fee *= DEEP_LAYER_MULTIPLIER;
        }
        if quality.geo_verification {
            fee *= GEO_VERIFICATION_MULTIPLIER;
        }
        if quality.ai_scoring {
            fee *= AI_SCORING_MULTIPLIER;
        }
    }

    fee
}

/// Flat analytics fee if the dashboard was requested.
pub fn analytics_fee(requested: bool) -> f64 {
    if requested {
        ANALYTICS_FEE
    } else {
        0.0
    }
}

/// Fine-tuning export fee, scaled by dataset size. `None` means the export
/// was not requested.
pub fn fine_tuning_fee(dataset_size: Option<i64>) -> f64 {
    let Some(size) = dataset_size else {
        return 0.0;
    };
    let mut fee = FINE_TUNING_FEE_BASE;
    if size > LARGE_DATASET_THRESHOLD {
        fee *= LARGE_DATASET_MULTIPLIER;
    }
    if size > HUGE_DATASET_THRESHOLD {
        fee *= HUGE_DATASET_MULTIPLIER;
    }
    fee
}

/// Advisory discount range by respondent count.
pub fn suggested_discount(number_of_respondents: i64) -> DiscountRange {
    if number_of_respondents > 5_000 {
        DiscountRange { min: 5.0, max: 15.0 }
    } else if number_of_respondents > 1_000 {
        DiscountRange { min: 3.0, max: 10.0 }
    } else {
        DiscountRange { min: 0.0, max: 5.0 }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Compose a full campaign quote from the operational summary.
///
/// `total_responses` is the sum of `required_responses` across the priced
/// questions (feeds the per-response fee only).
pub fn compose_quote(
    operational: PricingSummary,
    urgency: Urgency,
    total_responses: i64,
    opts: &QuoteOptions,
) -> CampaignQuote {
    let setup = setup_fee(urgency);
    let per_response = per_response_fee(operational.total_revenue, total_responses);
    let validation = validation_fee(opts.number_of_respondents, opts.quality_rules.as_ref());
    let analytics = analytics_fee(opts.analytics_dashboard);
    let fine_tuning = fine_tuning_fee(opts.fine_tuning_dataset_size);

    let total_cost = operational.total_cost + opts.reward_budget + validation;
    let total_revenue = operational.total_revenue + setup + analytics + fine_tuning;
    let margin_pct = margin_percentage(total_revenue, total_cost);

    CampaignQuote {
        total_cost,
        total_revenue,
        total_margin: total_revenue - total_cost,
        margin_percentage: margin_pct,
        setup_fee: setup,
        per_response_fee: per_response,
        validation_fee: validation,
        analytics_fee: analytics,
        fine_tuning_fee: fine_tuning,
        reward_budget: opts.reward_budget,
        suggested_discount: suggested_discount(opts.number_of_respondents),
        currency: operational.currency.clone(),
        validation: margin_verdict(margin_pct),
        operational,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{margin_verdict, MarginVerdict};

    fn summary(revenue: f64, cost: f64) -> PricingSummary {
        let pct = margin_percentage(revenue, cost);
        PricingSummary {
            total_cost: cost,
            total_revenue: revenue,
            total_margin: revenue - cost,
            margin_percentage: pct,
            breakdown: Vec::new(),
            validation: margin_verdict(pct),
            currency: "USD".into(),
        }
    }

    fn verdict_is_consistent(v: &MarginVerdict, pct: f64) {
        assert_eq!(v.is_valid, pct >= 20.0);
    }

    // -- setup fee --

    #[test]
    fn setup_fee_express_is_thirty_percent_higher() {
        let standard = setup_fee(Urgency::Standard);
        let express = setup_fee(Urgency::Express);
        assert!((express - standard * 1.3).abs() < 1e-9);
    }

    // -- per-response fee --

    #[test]
    fn per_response_fee_is_average_revenue() {
        assert!((per_response_fee(260.0, 100) - 2.6).abs() < 1e-9);
    }

    #[test]
    fn per_response_fee_zero_responses() {
        assert_eq!(per_response_fee(260.0, 0), 0.0);
        assert_eq!(per_response_fee(260.0, -5), 0.0);
    }

    // -- validation fee --

    #[test]
    fn validation_fee_base_rate() {
        assert!((validation_fee(1000, None) - 500.0).abs() < 1e-9);
    }

    fn layers(n: usize) -> QualityRules {
        QualityRules {
            validation_layers: (0..n).map(|i| format!("layer_{i}")).collect(),
            geo_verification: false,
            ai_scoring: false,
        }
    }

    #[test]
    fn validation_fee_layer_scaling() {
        let base = validation_fee(1000, None);

        let two = validation_fee(1000, Some(&layers(2)));
        assert!((two - base).abs() < 1e-9);

        let three = validation_fee(1000, Some(&layers(3)));
        assert!((three - base * 1.2).abs() < 1e-9);

        let four = validation_fee(1000, Some(&layers(4)));
        assert!((four - base * 1.2 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn validation_fee_geo_and_ai_compose() {
        let mut quality = layers(4);
        quality.geo_verification = true;
        quality.ai_scoring = true;
        let fee = validation_fee(1000, Some(&quality));
        assert!((fee - 500.0 * 1.2 * 1.1 * 1.15 * 1.25).abs() < 1e-6);
    }

    #[test]
    fn validation_fee_negative_respondents_clamped() {
        assert_eq!(validation_fee(-10, None), 0.0);
    }

    // -- analytics / fine-tuning --

    #[test]
    fn analytics_fee_flat() {
        assert_eq!(analytics_fee(false), 0.0);
        assert!((analytics_fee(true) - ANALYTICS_FEE).abs() < 1e-9);
    }

    #[test]
    fn fine_tuning_fee_scaling() {
        assert_eq!(fine_tuning_fee(None), 0.0);
        assert!((fine_tuning_fee(Some(5_000)) - FINE_TUNING_FEE_BASE).abs() < 1e-9);
        assert!(
            (fine_tuning_fee(Some(10_001)) - FINE_TUNING_FEE_BASE * 1.5).abs() < 1e-9
        );
        assert!(
            (fine_tuning_fee(Some(50_001)) - FINE_TUNING_FEE_BASE * 1.5 * 1.3).abs() < 1e-6
        );
    }

    #[test]
    fn fine_tuning_thresholds_are_exclusive() {
        assert!((fine_tuning_fee(Some(10_000)) - FINE_TUNING_FEE_BASE).abs() < 1e-9);
        assert!(
            (fine_tuning_fee(Some(50_000)) - FINE_TUNING_FEE_BASE * 1.5).abs() < 1e-9
        );
    }

    // -- discount --

    #[test]
    fn discount_bands() {
        assert_eq!(
            suggested_discount(6_000),
            DiscountRange { min: 5.0, max: 15.0 }
        );
        assert_eq!(
            suggested_discount(2_000),
            DiscountRange { min: 3.0, max: 10.0 }
        );
        assert_eq!(
            suggested_discount(100),
            DiscountRange { min: 0.0, max: 5.0 }
        );
        assert_eq!(
            suggested_discount(1_000),
            DiscountRange { min: 0.0, max: 5.0 }
        );
    }

    // -- composition --

    #[test]
    fn composite_totals() {
        let opts = QuoteOptions {
            number_of_respondents: 1000,
            reward_budget: 2_000.0,
            quality_rules: None,
            analytics_dashboard: true,
            fine_tuning_dataset_size: None,
        };
        let quote = compose_quote(summary(10_000.0, 4_000.0), Urgency::Standard, 1000, &opts);

        // cost = 4000 + 2000 reward + 500 validation
        assert!((quote.total_cost - 6_500.0).abs() < 1e-9);
        // revenue = 10000 + 500 setup + 750 analytics
        assert!((quote.total_revenue - 11_250.0).abs() < 1e-9);
        assert!((quote.total_margin - 4_750.0).abs() < 1e-9);
        verdict_is_consistent(&quote.validation, quote.margin_percentage);
        assert!((quote.per_response_fee - 10.0).abs() < 1e-9);
        assert_eq!(quote.currency, "USD");
    }

    #[test]
    fn reward_budget_hits_cost_not_revenue() {
        let opts = QuoteOptions {
            reward_budget: 1_000.0,
            ..Default::default()
        };
        let base = compose_quote(
            summary(10_000.0, 4_000.0),
            Urgency::Standard,
            0,
            &QuoteOptions::default(),
        );
        let with_reward = compose_quote(summary(10_000.0, 4_000.0), Urgency::Standard, 0, &opts);

        assert!((with_reward.total_cost - base.total_cost - 1_000.0).abs() < 1e-9);
        assert!((with_reward.total_revenue - base.total_revenue).abs() < 1e-9);
    }

    #[test]
    fn express_quote_raises_setup_fee_exactly_thirty_percent() {
        let standard = compose_quote(
            summary(10_000.0, 4_000.0),
            Urgency::Standard,
            100,
            &QuoteOptions::default(),
        );
        let express = compose_quote(
            summary(10_000.0, 4_000.0),
            Urgency::Express,
            100,
            &QuoteOptions::default(),
        );
        assert!((express.setup_fee - standard.setup_fee * 1.3).abs() < 1e-9);
        assert!(
            (express.total_revenue - standard.total_revenue - standard.setup_fee * 0.3).abs()
                < 1e-9
        );
    }
}
