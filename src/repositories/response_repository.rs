use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Response,
};

/// Append-only ledger of submitted responses.
///
/// Implementations must reject a second non-reattempt entry for the same
/// (user, question) pair with `AppError::Conflict` atomically with the insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    async fn create(&self, response: Response) -> AppResult<Response>;
    /// The non-reattempt entry for the pair, if any.
    async fn find_original(&self, user_id: &str, question_id: &str) -> AppResult<Option<Response>>;
    async fn find_by_user_and_question(
        &self,
        user_id: &str,
        question_id: &str,
    ) -> AppResult<Vec<Response>>;
    /// All entries of a user, oldest first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Response>>;
    async fn find_all(&self) -> AppResult<Vec<Response>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoResponseRepository {
    collection: Collection<Response>,
}

impl MongoResponseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("responses");
        Self { collection }
    }
}

#[async_trait]
impl ResponseRepository for MongoResponseRepository {
    async fn create(&self, response: Response) -> AppResult<Response> {
        self.collection.insert_one(&response).await.map_err(|e| {
            AppError::from_write(e, "Response already submitted for this survey")
        })?;
        Ok(response)
    }

    async fn find_original(&self, user_id: &str, question_id: &str) -> AppResult<Option<Response>> {
        // Legacy documents have no `is_reattempt` field and count as originals.
        let response = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "question_id": question_id,
                "is_reattempt": { "$ne": true }
            })
            .await?;
        Ok(response)
    }

    async fn find_by_user_and_question(
        &self,
        user_id: &str,
        question_id: &str,
    ) -> AppResult<Vec<Response>> {
        let responses = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "question_id": question_id
            })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Response>> {
        let responses = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn find_all(&self) -> AppResult<Vec<Response>> {
        let responses = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for responses collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Serializes the duplicate check: only one original attempt per pair,
        // reattempts are unrestricted.
        let original_attempt_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "is_reattempt": false })
                    .name("user_question_original_unique".to_string())
                    .build(),
            )
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_created".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(original_attempt_index).await?;
        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for responses collection");
        Ok(())
    }
}
