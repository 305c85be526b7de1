use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Section {
    pub fn new(name: &str, category_id: &str) -> Self {
        Section {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            category_id: category_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Subsection {
    pub id: String,
    pub name: String,
    pub section_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Subsection {
    pub fn new(name: &str, section_id: &str) -> Self {
        Subsection {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            section_id: section_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
