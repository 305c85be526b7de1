use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{QuestionType, ScoringType};

/// Body of a response submission. Every field is optional on the wire so that
/// missing fields surface as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub user_id: Option<String>,

    #[serde(alias = "surveyId")]
    pub question_id: Option<String>,

    #[validate(length(max = 10000))]
    pub answer: Option<String>,

    pub score: Option<f64>,

    #[serde(alias = "isReattempt")]
    pub reattempt: Option<bool>,

    /// Opaque reference to an uploaded file, absolute or server-relative.
    #[validate(length(max = 2048, message = "File reference is too long"))]
    pub file_url: Option<String>,
}

/// A submission whose required fields are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub user_id: String,
    pub question_id: String,
    pub answer: String,
    pub score: f64,
    pub reattempt: bool,
    pub file_url: Option<String>,
}

impl SubmitResponseRequest {
    pub fn into_submission(self) -> AppResult<ValidSubmission> {
        self.validate()?;

        let (Some(user_id), Some(question_id), Some(answer), Some(score)) = (
            non_blank(self.user_id),
            non_blank(self.question_id),
            non_blank(self.answer),
            self.score,
        ) else {
            return Err(AppError::ValidationError(
                "All fields are required".to_string(),
            ));
        };

        if !score.is_finite() || score < 0.0 {
            return Err(AppError::ValidationError(
                "Score must be a non-negative number".to_string(),
            ));
        }

        Ok(ValidSubmission {
            user_id,
            question_id,
            answer,
            score,
            reattempt: self.reattempt.unwrap_or(false),
            file_url: non_blank(self.file_url),
        })
    }
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub user_id: Option<String>,
}

impl ReportRequest {
    pub fn user_id(&self) -> AppResult<&str> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("User ID is required".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1))]
    pub category_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubsectionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1))]
    pub section_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,

    pub correct_option: Option<String>,

    pub question_type: Option<QuestionType>,

    pub scoring_type: Option<ScoringType>,

    #[validate(range(min = 0.0))]
    pub max_score: Option<f64>,

    #[validate(length(min = 1))]
    pub category_id: String,

    pub section_id: Option<String>,

    pub subsection_id: Option<String>,

    #[validate(length(max = 2048))]
    pub file_url: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question: Option<String>,

    pub options: Option<Vec<String>>,

    pub correct_option: Option<String>,

    pub question_type: Option<QuestionType>,

    pub scoring_type: Option<ScoringType>,

    #[validate(range(min = 0.0))]
    pub max_score: Option<f64>,

    pub category_id: Option<String>,

    pub section_id: Option<String>,

    pub subsection_id: Option<String>,

    #[validate(length(max = 2048))]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFilter {
    pub category_id: Option<String>,
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFilter {
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsectionFilter {
    pub section_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
