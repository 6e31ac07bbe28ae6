//! Campaign wizard staging document.
//!
//! Before finalization a campaign accumulates an ephemeral, partially
//! structured JSON document (`campaigns.wizard_data`). Two historical
//! question shapes exist side by side (an older camelCase form and the
//! current snake_case form), so normalization is an explicit step with a
//! documented field precedence rather than scattered fallbacks.
//!
//! Field precedence (first present, non-empty value wins):
//! - title: `title` -> `question` -> `text`
//! - type: `question_type` -> `questionType` -> `type`
//! - complexity: `complexity_level` -> `complexityLevel` -> `complexity`
//! - responses: `required_responses` -> `requiredResponses` -> `responses`

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::fees::QualityRules;
use crate::pricing::Urgency;
use crate::question::{
    QuestionType, DEFAULT_COMPLEXITY, DEFAULT_REQUIRED_RESPONSES,
};

// ---------------------------------------------------------------------------
// Document sections
// ---------------------------------------------------------------------------

/// Reward configuration section of the wizard document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RewardSection {
    #[serde(alias = "rewardPerResponse", alias = "per_response")]
    pub reward_per_response: Option<f64>,
    #[serde(alias = "rewardType")]
    pub reward_type: Option<String>,
}

/// Quality-rules section of the wizard document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QualitySection {
    #[serde(alias = "validationLayers")]
    pub validation_layers: Vec<String>,
    #[serde(alias = "geoVerification")]
    pub geo_verification: bool,
    #[serde(alias = "aiScoring")]
    pub ai_scoring: bool,
}

impl QualitySection {
    pub fn to_quality_rules(&self) -> QualityRules {
        QualityRules {
            validation_layers: self.validation_layers.clone(),
            geo_verification: self.geo_verification,
            ai_scoring: self.ai_scoring,
        }
    }
}

/// The parsed wizard staging document. Every field is optional; defaults
/// are applied at the finalizer boundary, not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WizardData {
    /// Staged questions, kept raw: each entry is normalized individually
    /// so one malformed question costs a warning, not the whole batch.
    pub questions: Vec<Value>,
    #[serde(alias = "numberOfRespondents", alias = "respondents")]
    pub number_of_respondents: Option<i64>,
    pub urgency: Option<String>,
    #[serde(alias = "targetCountries")]
    pub target_countries: Vec<String>,
    #[serde(alias = "demographicFilters")]
    pub demographic_filters: Vec<Value>,
    pub rewards: Option<RewardSection>,
    #[serde(alias = "qualityRules", alias = "quality")]
    pub quality_rules: Option<QualitySection>,
    /// Opaque pricing object written back by earlier wizard steps. Its
    /// presence (not its contents) feeds the launch precondition.
    pub pricing: Option<Value>,
    #[serde(alias = "analyticsDashboard")]
    pub analytics_dashboard: Option<bool>,
    #[serde(alias = "fineTuningDataset")]
    pub fine_tuning_dataset: Option<i64>,
}

impl WizardData {
    /// Parse a wizard document. The document must be a JSON object;
    /// unknown fields are ignored, known fields accept both historical
    /// spellings.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::Validation(
                "Wizard data must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Validation(format!("Malformed wizard data: {e}")))
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
            .as_deref()
            .map(Urgency::from_str_lenient)
            .unwrap_or_default()
    }

    /// First target country, if any.
    pub fn target_country(&self) -> Option<String> {
        self.target_countries.first().cloned()
    }

    pub fn demographic_filter_count(&self) -> u32 {
        self.demographic_filters.len() as u32
    }

    pub fn has_pricing(&self) -> bool {
        self.pricing.is_some()
    }

    /// Total contributor reward budget: respondents x per-response reward.
    /// Zero when either side is missing.
    pub fn reward_budget(&self) -> f64 {
        let per_response = self
            .rewards
            .as_ref()
            .and_then(|r| r.reward_per_response)
            .unwrap_or(0.0);
        per_response * self.number_of_respondents.unwrap_or(0).max(0) as f64
    }
}

// ---------------------------------------------------------------------------
// Question normalization
// ---------------------------------------------------------------------------

/// A staged question after normalization, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuestion {
    pub title: String,
    pub question_type: QuestionType,
    pub complexity_level: String,
    pub required_responses: i32,
    pub options: Option<Value>,
}

/// Normalize one staged question.
///
/// Returns a warning string instead of a question when the entry has no
/// resolvable content; the caller skips it and continues.
pub fn normalize_question(index: usize, value: &Value) -> Result<NormalizedQuestion, String> {
    let Some(obj) = value.as_object() else {
        return Err(format!("Question {} is not an object, skipped", index + 1));
    };

    let title = first_string(obj, &["title", "question", "text"]);
    let Some(title) = title else {
        return Err(format!("Question {} has no content, skipped", index + 1));
    };

    let question_type = first_string(obj, &["question_type", "questionType", "type"])
        .map(|raw| QuestionType::from_task_type(&raw))
        .unwrap_or(QuestionType::OpenText);

    let complexity_level = first_string(obj, &["complexity_level", "complexityLevel", "complexity"])
        .unwrap_or_else(|| DEFAULT_COMPLEXITY.to_string());

    let required_responses = first_i64(obj, &["required_responses", "requiredResponses", "responses"])
        .map(|n| n.clamp(1, i32::MAX as i64) as i32)
        .unwrap_or(DEFAULT_REQUIRED_RESPONSES);

    let options = obj
        .get("options")
        .or_else(|| obj.get("choices"))
        .filter(|v| !v.is_null())
        .cloned();

    Ok(NormalizedQuestion {
        title,
        question_type,
        complexity_level,
        required_responses,
        options,
    })
}

fn first_string(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_i64(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(|v| v.as_i64())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- WizardData parsing --

    #[test]
    fn parses_snake_case_document() {
        let doc = json!({
            "questions": [{ "title": "How often do you shop online?" }],
            "number_of_respondents": 500,
            "urgency": "express",
            "target_countries": ["DE", "FR"],
            "demographic_filters": [{ "age": "18-25" }, { "gender": "any" }],
            "rewards": { "reward_per_response": 0.25, "reward_type": "points" },
            "quality_rules": { "validation_layers": ["attention", "speed"], "geo_verification": true },
            "pricing": { "total": 1200.0 },
        });
        let wizard = WizardData::from_value(&doc).unwrap();

        assert_eq!(wizard.questions.len(), 1);
        assert_eq!(wizard.number_of_respondents, Some(500));
        assert_eq!(wizard.urgency(), Urgency::Express);
        assert_eq!(wizard.target_country().as_deref(), Some("DE"));
        assert_eq!(wizard.demographic_filter_count(), 2);
        assert!(wizard.has_pricing());
        assert!((wizard.reward_budget() - 125.0).abs() < 1e-9);
        let quality = wizard.quality_rules.unwrap();
        assert!(quality.geo_verification);
        assert_eq!(quality.validation_layers.len(), 2);
    }

    #[test]
    fn parses_camel_case_document() {
        let doc = json!({
            "numberOfRespondents": 100,
            "targetCountries": ["US"],
            "qualityRules": { "validationLayers": ["a", "b", "c"], "aiScoring": true },
            "analyticsDashboard": true,
            "fineTuningDataset": 20000,
        });
        let wizard = WizardData::from_value(&doc).unwrap();

        assert_eq!(wizard.number_of_respondents, Some(100));
        assert_eq!(wizard.target_country().as_deref(), Some("US"));
        assert_eq!(wizard.analytics_dashboard, Some(true));
        assert_eq!(wizard.fine_tuning_dataset, Some(20000));
        let quality = wizard.quality_rules.unwrap().to_quality_rules();
        assert!(quality.ai_scoring);
        assert_eq!(quality.validation_layers.len(), 3);
    }

    #[test]
    fn empty_document_is_valid() {
        let wizard = WizardData::from_value(&json!({})).unwrap();
        assert!(wizard.questions.is_empty());
        assert_eq!(wizard.urgency(), Urgency::Standard);
        assert!(!wizard.has_pricing());
        assert_eq!(wizard.reward_budget(), 0.0);
    }

    #[test]
    fn non_object_document_rejected() {
        assert!(WizardData::from_value(&json!(null)).is_err());
        assert!(WizardData::from_value(&json!([1, 2])).is_err());
        assert!(WizardData::from_value(&json!("wizard")).is_err());
    }

    #[test]
    fn reward_budget_needs_both_sides() {
        let only_rewards = WizardData::from_value(&json!({
            "rewards": { "reward_per_response": 1.0 }
        }))
        .unwrap();
        assert_eq!(only_rewards.reward_budget(), 0.0);

        let only_respondents =
            WizardData::from_value(&json!({ "number_of_respondents": 100 })).unwrap();
        assert_eq!(only_respondents.reward_budget(), 0.0);
    }

    // -- question normalization --

    #[test]
    fn normalizes_current_shape() {
        let q = json!({
            "title": "Rate our service",
            "question_type": "likert",
            "complexity_level": "medium",
            "required_responses": 50,
            "options": ["1", "2", "3", "4", "5"],
        });
        let norm = normalize_question(0, &q).unwrap();
        assert_eq!(norm.title, "Rate our service");
        assert_eq!(norm.question_type, QuestionType::Rating);
        assert_eq!(norm.complexity_level, "medium");
        assert_eq!(norm.required_responses, 50);
        assert!(norm.options.is_some());
    }

    #[test]
    fn normalizes_legacy_shape() {
        let q = json!({
            "question": "Which brands do you recognize?",
            "questionType": "checkbox",
            "complexityLevel": "hard",
            "requiredResponses": 25,
            "choices": ["A", "B"],
        });
        let norm = normalize_question(0, &q).unwrap();
        assert_eq!(norm.title, "Which brands do you recognize?");
        assert_eq!(norm.question_type, QuestionType::MultipleChoice);
        assert_eq!(norm.complexity_level, "hard");
        assert_eq!(norm.required_responses, 25);
    }

    #[test]
    fn precedence_prefers_current_fields() {
        let q = json!({
            "title": "current",
            "question": "legacy",
            "question_type": "rating",
            "type": "checkbox",
        });
        let norm = normalize_question(0, &q).unwrap();
        assert_eq!(norm.title, "current");
        assert_eq!(norm.question_type, QuestionType::Rating);
    }

    #[test]
    fn defaults_applied() {
        let q = json!({ "title": "Anything to add?" });
        let norm = normalize_question(0, &q).unwrap();
        assert_eq!(norm.question_type, QuestionType::OpenText);
        assert_eq!(norm.complexity_level, DEFAULT_COMPLEXITY);
        assert_eq!(norm.required_responses, DEFAULT_REQUIRED_RESPONSES);
        assert!(norm.options.is_none());
    }

    #[test]
    fn missing_content_yields_warning() {
        let err = normalize_question(2, &json!({ "question_type": "rating" })).unwrap_err();
        assert!(err.contains("Question 3"));
        assert!(err.contains("no content"));
    }

    #[test]
    fn blank_title_counts_as_missing() {
        assert!(normalize_question(0, &json!({ "title": "   " })).is_err());
    }

    #[test]
    fn non_object_question_yields_warning() {
        assert!(normalize_question(0, &json!("just a string")).is_err());
    }

    #[test]
    fn zero_responses_clamped_to_one() {
        let q = json!({ "title": "t", "required_responses": 0 });
        assert_eq!(normalize_question(0, &q).unwrap().required_responses, 1);
    }

    #[test]
    fn unmapped_type_falls_back_to_open_text() {
        let q = json!({ "title": "t", "type": "hologram" });
        assert_eq!(
            normalize_question(0, &q).unwrap().question_type,
            QuestionType::OpenText
        );
    }
}
