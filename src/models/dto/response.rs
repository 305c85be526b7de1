use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{Category, Question, ReportModel, Response};

/// A ledger entry joined with the catalog rows it references. Either side of
/// the join may be gone if the catalog was edited after submission.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetail {
    pub response: Response,
    pub user_email: Option<String>,
    pub question: Option<Question>,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ReportDeliveryReceipt {
    pub recipient: String,
    pub message: String,
    pub report: ReportModel,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
