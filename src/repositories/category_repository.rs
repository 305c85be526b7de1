use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Category,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> AppResult<Category>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Category>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("categories");
        Self { collection }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, category: Category) -> AppResult<Category> {
        self.collection
            .insert_one(&category)
            .await
            .map_err(|e| AppError::from_write(e, "Category already exists"))?;
        Ok(category)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "id": id }).await?;
        Ok(category)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let categories = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(categories)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "name": name }).await?;
        Ok(category)
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(categories)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        // Names are not unique at the storage level: older data holds
        // distinct categories that share a display name.
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        log::info!("Successfully created indexes for categories collection");
        Ok(())
    }
}
