//! Question type vocabulary and complexity levels.
//!
//! The campaign wizard accumulates questions in a loose internal vocabulary
//! ("checkbox", "likert", "bounding_box", ...). At finalization that
//! vocabulary is mapped onto the smaller persisted [`QuestionType`] enum;
//! anything unrecognized falls back to [`QuestionType::OpenText`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Persisted question types
// ---------------------------------------------------------------------------

/// The persisted question type enum stored on `questions.question_type`
/// and keyed against `pricing_rules.question_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    OpenText,
    MultipleChoice,
    SingleChoice,
    Rating,
    ImageAnnotation,
    AudioTranscription,
}

impl QuestionType {
    /// Convert to the database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenText => "open_text",
            Self::MultipleChoice => "multiple_choice",
            Self::SingleChoice => "single_choice",
            Self::Rating => "rating",
            Self::ImageAnnotation => "image_annotation",
            Self::AudioTranscription => "audio_transcription",
        }
    }

    /// Map a wizard task-type string onto a persisted question type.
    ///
    /// Accepts both the persisted names and the wizard's internal
    /// vocabulary. Unmapped values fall back to `OpenText` rather than
    /// failing: by the time finalize runs, the staged data is what it is.
    pub fn from_task_type(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open_text" | "open" | "text" | "free_text" | "freeform" => Self::OpenText,
            "multiple_choice" | "multi_choice" | "multi" | "checkbox" => Self::MultipleChoice,
            "single_choice" | "single" | "radio" | "dropdown" => Self::SingleChoice,
            "rating" | "scale" | "likert" | "stars" => Self::Rating,
            "image_annotation" | "annotation" | "bounding_box" | "image_label" => {
                Self::ImageAnnotation
            }
            "audio_transcription" | "transcription" | "audio" => Self::AudioTranscription,
            _ => Self::OpenText,
        }
    }
}

// ---------------------------------------------------------------------------
// Complexity levels
// ---------------------------------------------------------------------------

/// Known complexity levels, matching `complexity_configs.difficulty_level`
/// seed data. The pricing chain tolerates unknown levels (factor 1.0), so
/// these are advisory constants rather than a closed enum.
pub const COMPLEXITY_EASY: &str = "easy";
pub const COMPLEXITY_MEDIUM: &str = "medium";
pub const COMPLEXITY_HARD: &str = "hard";

/// Default complexity assigned to staged questions that carry none.
pub const DEFAULT_COMPLEXITY: &str = COMPLEXITY_EASY;

/// Default response requirement for staged questions that carry none.
pub const DEFAULT_REQUIRED_RESPONSES: i32 = 10;
