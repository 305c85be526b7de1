use async_graphql::{ComplexObject, SimpleObject};
use serde::{Serialize, Serializer};

/// Bucket name for responses whose question has no resolvable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Structured score report for one user. Every string field has already been
/// stripped of markup and can be embedded into HTML as-is.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub user_email: String,
    pub total_score: f64,
    /// Number of answered questions, not a sum of maximum scores.
    pub total_possible: u32,
    #[serde(serialize_with = "serialize_percentage")]
    #[graphql(skip)]
    pub percentage: f64,
    pub categories: Vec<CategoryReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub name: String,
    pub score: f64,
    /// Question count for the bucket; rendered as "score / total".
    pub total: u32,
    pub questions: Vec<QuestionEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEntry {
    pub question: String,
    pub answer: String,
    pub correct_option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub score: f64,
}

impl ReportModel {
    pub fn percentage_display(&self) -> String {
        format!("{:.2}", self.percentage)
    }
}

#[ComplexObject]
impl ReportModel {
    /// Two-decimal string, same as the REST body.
    #[graphql(name = "percentage")]
    async fn percentage_text(&self) -> String {
        self.percentage_display()
    }
}

/// `round(score / possible * 100, 2)`, or zero when nothing was answered.
pub fn percentage(total_score: f64, total_possible: u32) -> f64 {
    if total_possible == 0 {
        return 0.0;
    }
    let raw = total_score / f64::from(total_possible) * 100.0;
    (raw * 100.0).round() / 100.0
}

fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}
