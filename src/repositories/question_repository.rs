use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>>;
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Question>>;
    async fn find_by_section(&self, section_id: &str) -> AppResult<Vec<Question>>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("surveys");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection
            .insert_one(&question)
            .await
            .map_err(|e| AppError::from_write(e, format!("Question '{}' already exists", question.id)))?;
        Ok(question)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let questions = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "category_id": category_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_by_section(&self, section_id: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "section_id": section_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "id": &question.id }, &question)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Survey with id '{}' not found",
                question.id
            )));
        }
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Survey with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for surveys collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("category_id".to_string())
                    .build(),
            )
            .build();

        let section_index = IndexModel::builder()
            .keys(doc! { "section_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("section_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(category_index).await?;
        self.collection.create_index(section_index).await?;

        log::info!("Successfully created indexes for surveys collection");
        Ok(())
    }
}
