//! Pricing rule resolution and per-question cost/price calculation.
//!
//! Four independently versioned factor tables (base rules, complexity
//! multipliers, cost-of-living multipliers, task-type multipliers) are
//! merged once into an immutable [`RuleBook`], which is then passed by
//! value into the calculator. The calculator itself is pure: given a rule
//! book, a question set, and the campaign-level context it produces a
//! [`PricingSummary`] with one [`BreakdownLine`] per question.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Margin thresholds
// ---------------------------------------------------------------------------

/// Minimum margin percentage for a pricing result to be considered valid.
pub const MARGIN_TARGET_PCT: f64 = 20.0;

/// Margin percentage at or above which the verdict is "excellent".
pub const MARGIN_EXCELLENT_PCT: f64 = 30.0;

// ---------------------------------------------------------------------------
// Factor-map dimension keys
// ---------------------------------------------------------------------------

/// Rule-map dimension holding urgency factors (keyed by urgency name).
pub const DIM_URGENCY: &str = "urgency";

/// Rule-map dimension holding country factors (keyed by country code).
pub const DIM_COUNTRY: &str = "country";

/// Rule-map dimension opting the rule into cost-of-living adjustment.
/// The factor itself comes from the merged cost-of-living table, keyed by
/// `"{country}_{currency}"`.
pub const DIM_COST_OF_LIVING: &str = "cost_of_living";

/// Rule-map dimension holding demographic-filter factors (keyed by the
/// stringified filter count).
pub const DIM_DEMOGRAPHIC_FILTERS: &str = "demographic_filters";

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Campaign urgency. Express campaigns pay a premium on the setup fee and
/// typically carry a rule-level urgency factor as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Standard,
    Express,
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Standard
    }
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }

    /// Parse an urgency string from the wizard document or an API request.
    /// Unknown values are treated as standard rather than rejected.
    pub fn from_str_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "express" | "urgent" | "rush" => Self::Express,
            _ => Self::Standard,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver inputs
// ---------------------------------------------------------------------------

/// An active row from `pricing_rules`, stripped to what resolution needs.
#[derive(Debug, Clone)]
pub struct RuleSource {
    pub question_type: String,
    pub base_price_per_answer: f64,
    pub base_cost_per_answer: f64,
    /// The rule's own nested factor map (JSONB). Top-level keys are
    /// dimensions; each dimension maps factor keys to floats. Non-numeric
    /// or non-object entries are ignored.
    pub multiplier_factors: serde_json::Value,
}

/// An active row from `complexity_configs`.
#[derive(Debug, Clone)]
pub struct ComplexitySource {
    pub difficulty_level: String,
    pub multiplier_value: f64,
}

/// A row from `cost_of_living_multipliers`.
#[derive(Debug, Clone)]
pub struct CostOfLivingSource {
    pub country_code: String,
    pub currency: String,
    pub multiplier: f64,
}

/// An active row from `task_type_configs`.
#[derive(Debug, Clone)]
pub struct TaskTypeSource {
    pub task_type: String,
    pub base_cost_multiplier: f64,
}

// ---------------------------------------------------------------------------
// Resolved rules
// ---------------------------------------------------------------------------

/// Factor maps attached to one resolved rule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleMultipliers {
    /// `difficulty_level -> multiplier`, from the complexity table.
    pub complexity: HashMap<String, f64>,
    /// `"{country}_{currency}" -> multiplier`, from the cost-of-living table.
    pub cost_of_living: HashMap<String, f64>,
    /// `task_type -> multiplier`, from the task-type table. Informational:
    /// the task-type factor is already folded into `base_cost` at
    /// resolution time and must not be reapplied.
    pub task_type: HashMap<String, f64>,
    /// The rule's own nested factor map, carried through verbatim
    /// (urgency, country, and any ad-hoc dimensions).
    pub rule_factors: HashMap<String, HashMap<String, f64>>,
}

/// One question type's fully merged pricing inputs.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRule {
    pub base_price: f64,
    /// Base cost with the task-type multiplier already applied.
    pub base_cost: f64,
    pub multipliers: RuleMultipliers,
}

/// Immutable map of resolved rules, built once per calculation.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    rules: HashMap<String, ResolvedRule>,
}

impl RuleBook {
    /// Look up the resolved rule for a question type.
    ///
    /// A missing rule is a hard failure: it signals a configuration gap in
    /// the rule tables, and no partial price may be produced from it.
    pub fn get(&self, question_type: &str) -> Result<&ResolvedRule, CoreError> {
        self.rules
            .get(question_type)
            .ok_or_else(|| CoreError::MissingRule {
                question_type: question_type.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Merge the four factor tables into a [`RuleBook`].
///
/// The task-type multiplier matching the rule's question type is applied
/// onto `base_cost` here, and only here. The complexity and cost-of-living
/// tables are shared across all rules; the rule's own factor map is parsed
/// into nested float maps and carried through untouched.
pub fn resolve_rules(
    rules: &[RuleSource],
    complexity: &[ComplexitySource],
    cost_of_living: &[CostOfLivingSource],
    task_types: &[TaskTypeSource],
) -> RuleBook {
    let complexity_map: HashMap<String, f64> = complexity
        .iter()
        .map(|c| (c.difficulty_level.clone(), c.multiplier_value))
        .collect();

    let col_map: HashMap<String, f64> = cost_of_living
        .iter()
        .map(|c| {
            (
                format!("{}_{}", c.country_code, c.currency),
                c.multiplier,
            )
        })
        .collect();

    let task_map: HashMap<String, f64> = task_types
        .iter()
        .map(|t| (t.task_type.clone(), t.base_cost_multiplier))
        .collect();

    let mut resolved = HashMap::with_capacity(rules.len());
    for rule in rules {
        let task_factor = task_map.get(&rule.question_type).copied().unwrap_or(1.0);

        resolved.insert(
            rule.question_type.clone(),
            ResolvedRule {
                base_price: rule.base_price_per_answer,
                base_cost: rule.base_cost_per_answer * task_factor,
                multipliers: RuleMultipliers {
                    complexity: complexity_map.clone(),
                    cost_of_living: col_map.clone(),
                    task_type: task_map.clone(),
                    rule_factors: parse_factor_map(&rule.multiplier_factors),
                },
            },
        );
    }

    RuleBook { rules: resolved }
}

/// Parse a JSONB factor document into nested `dimension -> key -> f64` maps.
fn parse_factor_map(value: &serde_json::Value) -> HashMap<String, HashMap<String, f64>> {
    let mut out = HashMap::new();
    let Some(dims) = value.as_object() else {
        return out;
    };
    for (dim, entry) in dims {
        let Some(factors) = entry.as_object() else {
            continue;
        };
        // An empty sub-map still declares the dimension (opt-in marker).
        let parsed: HashMap<String, f64> = factors
            .iter()
            .filter_map(|(k, v)| v.as_f64().map(|f| (k.clone(), f)))
            .collect();
        out.insert(dim.clone(), parsed);
    }
    out
}

// ---------------------------------------------------------------------------
// Calculator inputs
// ---------------------------------------------------------------------------

/// One question to price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub question_type: String,
    pub complexity_level: String,
    pub required_responses: i32,
}

/// Campaign-level pricing context shared by all questions.
#[derive(Debug, Clone)]
pub struct PricingContext {
    pub urgency: Urgency,
    /// First entry of the campaign's target country list, if any.
    pub target_country: Option<String>,
    pub demographic_filter_count: u32,
    pub currency: String,
}

impl Default for PricingContext {
    fn default() -> Self {
        Self {
            urgency: Urgency::Standard,
            target_country: None,
            demographic_filter_count: 0,
            currency: "USD".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator outputs
// ---------------------------------------------------------------------------

/// Per-question cost/price/margin line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub question_type: String,
    pub complexity_level: String,
    pub required_responses: i32,
    pub cost_per_answer: f64,
    pub price_per_answer: f64,
    pub total_cost: f64,
    pub total_price: f64,
    pub margin: f64,
    pub margin_percentage: f64,
}

/// Advisory verdict on a pricing result's margin. Never blocks the
/// calculation itself; gates lifecycle transitions downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginVerdict {
    pub is_valid: bool,
    pub message: String,
}

/// Aggregate pricing result for a question set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_margin: f64,
    pub margin_percentage: f64,
    pub breakdown: Vec<BreakdownLine>,
    pub validation: MarginVerdict,
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Margin percentage with division-by-zero guard.
pub fn margin_percentage(total_price: f64, total_cost: f64) -> f64 {
    if total_price == 0.0 {
        0.0
    } else {
        (total_price - total_cost) / total_price * 100.0
    }
}

/// Produce the advisory margin verdict for a margin percentage.
pub fn margin_verdict(margin_pct: f64) -> MarginVerdict {
    if margin_pct >= MARGIN_EXCELLENT_PCT {
        MarginVerdict {
            is_valid: true,
            message: format!("Excellent margin ({margin_pct:.1}%)"),
        }
    } else if margin_pct >= MARGIN_TARGET_PCT {
        MarginVerdict {
            is_valid: true,
            message: format!("Good margin ({margin_pct:.1}%)"),
        }
    } else {
        MarginVerdict {
            is_valid: false,
            message: format!(
                "Margin {margin_pct:.1}% is below target; {MARGIN_TARGET_PCT:.0}%+ recommended"
            ),
        }
    }
}

/// Compute the scalar multiplier chain for one question.
///
/// Always applied: the complexity factor and the rule's own urgency and
/// country factors (each defaulting to 1.0 when absent). Cost-of-living and
/// demographic-filter factors join the chain only when the rule's own
/// factor map declares the dimension.
fn multiplier_chain(rule: &ResolvedRule, complexity_level: &str, ctx: &PricingContext) -> f64 {
    let m = &rule.multipliers;

    let mut chain = m.complexity.get(complexity_level).copied().unwrap_or(1.0);

    chain *= rule_factor(m, DIM_URGENCY, ctx.urgency.as_str());

    if let Some(country) = &ctx.target_country {
        chain *= rule_factor(m, DIM_COUNTRY, country);

        if m.rule_factors.contains_key(DIM_COST_OF_LIVING) {
            let key = format!("{}_{}", country, ctx.currency);
            chain *= m.cost_of_living.get(&key).copied().unwrap_or(1.0);
        }
    }

    if m.rule_factors.contains_key(DIM_DEMOGRAPHIC_FILTERS) {
        chain *= rule_factor(
            m,
            DIM_DEMOGRAPHIC_FILTERS,
            &ctx.demographic_filter_count.to_string(),
        );
    }

    chain
}

/// Look up one factor in the rule's own map, defaulting to 1.0.
fn rule_factor(m: &RuleMultipliers, dimension: &str, key: &str) -> f64 {
    m.rule_factors
        .get(dimension)
        .and_then(|d| d.get(key))
        .copied()
        .unwrap_or(1.0)
}

/// Price a single question against its resolved rule.
pub fn price_question(
    rule: &ResolvedRule,
    question: &QuestionInput,
    ctx: &PricingContext,
) -> BreakdownLine {
    let chain = multiplier_chain(rule, &question.complexity_level, ctx);
    let responses = question.required_responses.max(0) as f64;

    let cost_per_answer = rule.base_cost * chain;
    let price_per_answer = rule.base_price * chain;
    let total_cost = cost_per_answer * responses;
    let total_price = price_per_answer * responses;

    BreakdownLine {
        question_type: question.question_type.clone(),
        complexity_level: question.complexity_level.clone(),
        required_responses: question.required_responses,
        cost_per_answer,
        price_per_answer,
        total_cost,
        total_price,
        margin: total_price - total_cost,
        margin_percentage: margin_percentage(total_price, total_cost),
    }
}

/// Price a question set and aggregate.
///
/// Totals are straight sums over the per-line totals; the aggregate margin
/// percentage is recomputed from the sums, not averaged across lines.
/// Fails with [`CoreError::MissingRule`] on the first question type without
/// an active rule.
pub fn price_campaign(
    book: &RuleBook,
    questions: &[QuestionInput],
    ctx: &PricingContext,
) -> Result<PricingSummary, CoreError> {
    let mut breakdown = Vec::with_capacity(questions.len());
    let mut total_cost = 0.0;
    let mut total_price = 0.0;

    for question in questions {
        let rule = book.get(&question.question_type)?;
        let line = price_question(rule, question, ctx);
        total_cost += line.total_cost;
        total_price += line.total_price;
        breakdown.push(line);
    }

    let margin_pct = margin_percentage(total_price, total_cost);

    Ok(PricingSummary {
        total_cost,
        total_revenue: total_price,
        total_margin: total_price - total_cost,
        margin_percentage: margin_pct,
        breakdown,
        validation: margin_verdict(margin_pct),
        currency: ctx.currency.clone(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_rules() -> Vec<RuleSource> {
        vec![
            RuleSource {
                question_type: "open_text".into(),
                base_price_per_answer: 2.0,
                base_cost_per_answer: 1.2,
                multiplier_factors: json!({
                    "urgency": { "express": 1.5 },
                    "country": { "DE": 1.1 },
                }),
            },
            RuleSource {
                question_type: "rating".into(),
                base_price_per_answer: 1.0,
                base_cost_per_answer: 0.4,
                multiplier_factors: json!({}),
            },
        ]
    }

    fn sample_complexity() -> Vec<ComplexitySource> {
        vec![
            ComplexitySource {
                difficulty_level: "easy".into(),
                multiplier_value: 1.0,
            },
            ComplexitySource {
                difficulty_level: "medium".into(),
                multiplier_value: 1.3,
            },
            ComplexitySource {
                difficulty_level: "hard".into(),
                multiplier_value: 1.8,
            },
        ]
    }

    fn book() -> RuleBook {
        resolve_rules(&sample_rules(), &sample_complexity(), &[], &[])
    }

    fn question(qt: &str, level: &str, responses: i32) -> QuestionInput {
        QuestionInput {
            question_type: qt.into(),
            complexity_level: level.into(),
            required_responses: responses,
        }
    }

    // -- resolver --

    #[test]
    fn missing_rule_is_hard_failure() {
        let err = book().get("telepathy").unwrap_err();
        assert!(matches!(err, CoreError::MissingRule { .. }));
        assert!(err.to_string().contains("telepathy"));
    }

    #[test]
    fn task_type_multiplier_applied_once_to_base_cost() {
        let task_types = vec![TaskTypeSource {
            task_type: "open_text".into(),
            base_cost_multiplier: 2.0,
        }];
        let book = resolve_rules(&sample_rules(), &sample_complexity(), &[], &task_types);
        let rule = book.get("open_text").unwrap();

        assert!((rule.base_cost - 2.4).abs() < 1e-9);
        // Base price is untouched by the task-type factor.
        assert!((rule.base_price - 2.0).abs() < 1e-9);
    }

    #[test]
    fn task_type_without_match_leaves_cost_alone() {
        let task_types = vec![TaskTypeSource {
            task_type: "rating".into(),
            base_cost_multiplier: 3.0,
        }];
        let book = resolve_rules(&sample_rules(), &sample_complexity(), &[], &task_types);
        assert!((book.get("open_text").unwrap().base_cost - 1.2).abs() < 1e-9);
        assert!((book.get("rating").unwrap().base_cost - 1.2).abs() < 1e-9);
    }

    #[test]
    fn factor_map_ignores_non_numeric_entries() {
        let rules = vec![RuleSource {
            question_type: "open_text".into(),
            base_price_per_answer: 1.0,
            base_cost_per_answer: 0.5,
            multiplier_factors: json!({
                "urgency": { "express": "fast", "standard": 1.0 },
                "note": "not a dimension",
            }),
        }];
        let book = resolve_rules(&rules, &[], &[], &[]);
        let rule = book.get("open_text").unwrap();
        let urgency = rule.multipliers.rule_factors.get("urgency").unwrap();
        assert_eq!(urgency.len(), 1);
        assert!(!rule.multipliers.rule_factors.contains_key("note"));
    }

    // -- margin helpers --

    #[test]
    fn margin_percentage_zero_price_is_zero() {
        assert_eq!(margin_percentage(0.0, 10.0), 0.0);
    }

    #[test]
    fn margin_percentage_exact() {
        assert!((margin_percentage(26.0, 15.6) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn verdict_tiers() {
        assert!(margin_verdict(30.0).is_valid);
        assert!(margin_verdict(30.0).message.contains("Excellent"));
        assert!(margin_verdict(25.0).is_valid);
        assert!(margin_verdict(25.0).message.contains("Good"));
        let below = margin_verdict(19.9);
        assert!(!below.is_valid);
        assert!(below.message.contains("below target"));
    }

    // -- worked example from the pricing sheet --

    #[test]
    fn open_text_medium_standard_example() {
        let summary = price_campaign(
            &book(),
            &[question("open_text", "medium", 10)],
            &PricingContext::default(),
        )
        .unwrap();

        assert!((summary.total_revenue - 26.0).abs() < 1e-9);
        assert!((summary.total_cost - 15.6).abs() < 1e-9);
        assert!((summary.margin_percentage - 40.0).abs() < 1e-6);
        assert!(summary.validation.is_valid);
        assert!(summary.validation.message.contains("Excellent"));
    }

    #[test]
    fn express_urgency_uses_rule_factor() {
        let ctx = PricingContext {
            urgency: Urgency::Express,
            ..Default::default()
        };
        let summary = price_campaign(&book(), &[question("open_text", "easy", 10)], &ctx).unwrap();
        // 2.0 * 1.0 * 1.5 * 10
        assert!((summary.total_revenue - 30.0).abs() < 1e-9);
    }

    #[test]
    fn express_urgency_defaults_to_one_without_rule_factor() {
        let ctx = PricingContext {
            urgency: Urgency::Express,
            ..Default::default()
        };
        let summary = price_campaign(&book(), &[question("rating", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 10.0).abs() < 1e-9);
    }

    #[test]
    fn country_factor_applies_when_targeted() {
        let ctx = PricingContext {
            target_country: Some("DE".into()),
            ..Default::default()
        };
        let summary = price_campaign(&book(), &[question("open_text", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 22.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_complexity_defaults_to_one() {
        let summary = price_campaign(
            &book(),
            &[question("open_text", "nightmare", 10)],
            &PricingContext::default(),
        )
        .unwrap();
        assert!((summary.total_revenue - 20.0).abs() < 1e-9);
    }

    #[test]
    fn cost_of_living_only_when_rule_opts_in() {
        let col = vec![CostOfLivingSource {
            country_code: "CH".into(),
            currency: "USD".into(),
            multiplier: 1.4,
        }];
        let ctx = PricingContext {
            target_country: Some("CH".into()),
            ..Default::default()
        };

        // Rule without the cost_of_living dimension: table row unused.
        let plain = resolve_rules(&sample_rules(), &sample_complexity(), &col, &[]);
        let summary =
            price_campaign(&plain, &[question("open_text", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 20.0).abs() < 1e-9);

        // Rule opting in: factor from the merged table applies.
        let mut rules = sample_rules();
        rules[0].multiplier_factors = json!({ "cost_of_living": {} });
        let opted = resolve_rules(&rules, &sample_complexity(), &col, &[]);
        let summary = price_campaign(&opted, &[question("open_text", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 28.0).abs() < 1e-9);
    }

    #[test]
    fn demographic_filters_only_when_rule_opts_in() {
        let mut rules = sample_rules();
        rules[0].multiplier_factors = json!({ "demographic_filters": { "3": 1.2 } });
        let book = resolve_rules(&rules, &sample_complexity(), &[], &[]);

        let ctx = PricingContext {
            demographic_filter_count: 3,
            ..Default::default()
        };
        let summary = price_campaign(&book, &[question("open_text", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 24.0).abs() < 1e-9);

        // A count without a matching key falls back to 1.0.
        let ctx = PricingContext {
            demographic_filter_count: 5,
            ..Default::default()
        };
        let summary = price_campaign(&book, &[question("open_text", "easy", 10)], &ctx).unwrap();
        assert!((summary.total_revenue - 20.0).abs() < 1e-9);
    }

    // -- aggregation --

    #[test]
    fn aggregate_totals_equal_sum_of_lines() {
        let questions = vec![
            question("open_text", "medium", 10),
            question("rating", "easy", 100),
            question("open_text", "hard", 5),
        ];
        let summary =
            price_campaign(&book(), &questions, &PricingContext::default()).unwrap();

        let line_cost: f64 = summary.breakdown.iter().map(|l| l.total_cost).sum();
        let line_price: f64 = summary.breakdown.iter().map(|l| l.total_price).sum();
        assert!((summary.total_cost - line_cost).abs() < 1e-9);
        assert!((summary.total_revenue - line_price).abs() < 1e-9);
        assert!(
            (summary.margin_percentage
                - margin_percentage(summary.total_revenue, summary.total_cost))
            .abs()
                < 1e-9
        );
    }

    #[test]
    fn empty_question_set_prices_to_zero() {
        let summary = price_campaign(&book(), &[], &PricingContext::default()).unwrap();
        assert_eq!(summary.breakdown.len(), 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.margin_percentage, 0.0);
        assert!(!summary.validation.is_valid);
    }

    #[test]
    fn missing_rule_aborts_whole_calculation() {
        let questions = vec![
            question("open_text", "easy", 10),
            question("telepathy", "easy", 10),
        ];
        let err = price_campaign(&book(), &questions, &PricingContext::default()).unwrap_err();
        assert!(matches!(err, CoreError::MissingRule { .. }));
    }

    // -- urgency parsing --

    #[test]
    fn urgency_parses_leniently() {
        assert_eq!(Urgency::from_str_lenient("express"), Urgency::Express);
        assert_eq!(Urgency::from_str_lenient("RUSH"), Urgency::Express);
        assert_eq!(Urgency::from_str_lenient("standard"), Urgency::Standard);
        assert_eq!(Urgency::from_str_lenient("whatever"), Urgency::Standard);
    }
}
