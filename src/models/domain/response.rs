use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{legacy_schema_version, CURRENT_SCHEMA_VERSION};

/// One ledger entry per (user, question, attempt). Entries are only ever
/// appended; a reattempt is a new entry alongside the original.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct Response {
    pub id: String,
    pub user_id: String,
    pub question_id: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub is_reattempt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
}

impl Response {
    pub fn new(
        user_id: &str,
        question_id: &str,
        answer: &str,
        score: f64,
        is_reattempt: bool,
        file_url: Option<String>,
    ) -> Self {
        Response {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            question_id: question_id.to_string(),
            answer: answer.to_string(),
            score: Some(score),
            is_reattempt,
            file_url,
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: Utc::now(),
        }
    }
}
