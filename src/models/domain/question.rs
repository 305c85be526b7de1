use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{legacy_schema_version, CURRENT_SCHEMA_VERSION};

/// A single survey question. Legacy (version 1) documents are read with the
/// serde defaults below: multiple choice, partial scoring, no score ceiling.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub scoring_type: ScoringType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    FileUpload,
    Other,
}

impl QuestionType {
    /// Answers to selectable questions must be one of the listed options.
    pub fn is_selectable(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ScoringType {
    /// Any score between zero and the ceiling counts.
    #[default]
    Partial,
    /// Only a score that reaches the ceiling counts; anything below awards zero.
    AllOrNothing,
}

impl Question {
    pub fn new(question: &str, options: Vec<String>, category_id: &str) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            options,
            correct_option: None,
            question_type: QuestionType::MultipleChoice,
            scoring_type: ScoringType::Partial,
            max_score: None,
            category_id: category_id.to_string(),
            section_id: None,
            subsection_id: None,
            file_url: None,
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Whether a submitted answer has to be checked against `options`.
    pub fn requires_listed_answer(&self) -> bool {
        self.question_type.is_selectable() && !self.options.is_empty()
    }

    pub fn accepts_answer(&self, answer: &str) -> bool {
        !self.requires_listed_answer() || self.options.iter().any(|o| o == answer)
    }

    /// Checks the catalog invariants enforced on every admin write.
    pub fn check_invariants(&self) -> AppResult<()> {
        if self.question.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text cannot be empty".to_string(),
            ));
        }
        if let Some(correct) = &self.correct_option {
            if !self.options.iter().any(|o| o == correct) {
                return Err(AppError::ValidationError(format!(
                    "Correct option '{}' is not one of the question options",
                    correct
                )));
            }
        }
        if let Some(max) = self.max_score {
            if !max.is_finite() || max < 0.0 {
                return Err(AppError::ValidationError(
                    "Maximum score must be a non-negative number".to_string(),
                ));
            }
        }
        if self.question_type.is_selectable() && self.options.is_empty() {
            return Err(AppError::ValidationError(
                "Multiple choice questions need at least one option".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalizes a raw response score into the score this question awards.
    pub fn award(&self, raw: Option<f64>) -> f64 {
        let raw = raw.filter(|s| s.is_finite()).unwrap_or(0.0);
        let Some(max) = self.max_score.filter(|m| m.is_finite()) else {
            return raw;
        };
        let ceiling = max.max(0.0);
        let bounded = raw.clamp(0.0, ceiling);
        match self.scoring_type {
            ScoringType::Partial => bounded,
            ScoringType::AllOrNothing if bounded >= ceiling => ceiling,
            ScoringType::AllOrNothing => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        let mut question = Question::new(
            "2 + 2?",
            vec!["3".to_string(), "4".to_string()],
            "cat-math",
        );
        question.correct_option = Some("4".to_string());
        question.max_score = Some(10.0);
        question
    }

    #[test]
    fn legacy_document_gets_migration_defaults() {
        let json = r#"{"id":"q-1","question":"Old?","category_id":"c-1"}"#;
        let question: Question = serde_json::from_str(json).expect("legacy document should parse");

        assert_eq!(question.schema_version, 1);
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert_eq!(question.scoring_type, ScoringType::Partial);
        assert!(question.options.is_empty());
        assert!(question.max_score.is_none());
        assert!(question.correct_option.is_none());
    }

    #[test]
    fn new_question_carries_current_schema_version() {
        assert_eq!(sample().schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn question_type_uses_snake_case_tags() {
        let json = serde_json::to_string(&QuestionType::FileUpload).expect("serialize");
        assert_eq!(json, "\"file_upload\"");
        assert!(serde_json::from_str::<QuestionType>("\"essay\"").is_err());
    }

    #[test]
    fn correct_option_must_be_listed() {
        let mut question = sample();
        assert!(question.check_invariants().is_ok());

        question.correct_option = Some("5".to_string());
        assert!(matches!(
            question.check_invariants(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn file_upload_questions_accept_any_answer() {
        let mut question = sample();
        question.question_type = QuestionType::FileUpload;
        assert!(question.accepts_answer("https://files.example.com/essay.pdf"));

        question.question_type = QuestionType::MultipleChoice;
        assert!(question.accepts_answer("4"));
        assert!(!question.accepts_answer("five"));
    }

    #[test]
    fn award_clamps_to_max_score() {
        let question = sample();
        assert_eq!(question.award(Some(8.0)), 8.0);
        assert_eq!(question.award(Some(14.0)), 10.0);
        assert_eq!(question.award(Some(-3.0)), 0.0);
        assert_eq!(question.award(None), 0.0);
        assert_eq!(question.award(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn award_without_ceiling_keeps_raw_score() {
        let mut question = sample();
        question.max_score = None;
        assert_eq!(question.award(Some(42.0)), 42.0);
    }

    #[test]
    fn all_or_nothing_awards_ceiling_or_zero() {
        let mut question = sample();
        question.scoring_type = ScoringType::AllOrNothing;
        assert_eq!(question.award(Some(10.0)), 10.0);
        assert_eq!(question.award(Some(12.0)), 10.0);
        assert_eq!(question.award(Some(9.5)), 0.0);
    }
}
