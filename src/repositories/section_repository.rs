use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Section, Subsection},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn create_section(&self, section: Section) -> AppResult<Section>;
    async fn find_section_by_id(&self, id: &str) -> AppResult<Option<Section>>;
    async fn find_sections_by_ids(&self, ids: &[String]) -> AppResult<Vec<Section>>;
    async fn find_sections(&self) -> AppResult<Vec<Section>>;
    async fn find_sections_by_category(&self, category_id: &str) -> AppResult<Vec<Section>>;
    async fn create_subsection(&self, subsection: Subsection) -> AppResult<Subsection>;
    async fn find_subsections(&self) -> AppResult<Vec<Subsection>>;
    async fn find_subsections_by_section(&self, section_id: &str) -> AppResult<Vec<Subsection>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoSectionRepository {
    sections: Collection<Section>,
    subsections: Collection<Subsection>,
}

impl MongoSectionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            sections: db.get_collection("sections"),
            subsections: db.get_collection("subsections"),
        }
    }
}

fn id_unique_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "id": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("id_unique".to_string())
                .build(),
        )
        .build()
}

#[async_trait]
impl SectionRepository for MongoSectionRepository {
    async fn create_section(&self, section: Section) -> AppResult<Section> {
        self.sections
            .insert_one(&section)
            .await
            .map_err(|e| AppError::from_write(e, "Section already exists"))?;
        Ok(section)
    }

    async fn find_section_by_id(&self, id: &str) -> AppResult<Option<Section>> {
        let section = self.sections.find_one(doc! { "id": id }).await?;
        Ok(section)
    }

    async fn find_sections_by_ids(&self, ids: &[String]) -> AppResult<Vec<Section>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sections = self
            .sections
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(sections)
    }

    async fn find_sections(&self) -> AppResult<Vec<Section>> {
        let sections = self
            .sections
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(sections)
    }

    async fn find_sections_by_category(&self, category_id: &str) -> AppResult<Vec<Section>> {
        let sections = self
            .sections
            .find(doc! { "category_id": category_id })
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(sections)
    }

    async fn create_subsection(&self, subsection: Subsection) -> AppResult<Subsection> {
        self.subsections
            .insert_one(&subsection)
            .await
            .map_err(|e| AppError::from_write(e, "Subsection already exists"))?;
        Ok(subsection)
    }

    async fn find_subsections(&self) -> AppResult<Vec<Subsection>> {
        let subsections = self
            .subsections
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(subsections)
    }

    async fn find_subsections_by_section(&self, section_id: &str) -> AppResult<Vec<Subsection>> {
        let subsections = self
            .subsections
            .find(doc! { "section_id": section_id })
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(subsections)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        self.sections.create_index(id_unique_index()).await?;
        self.subsections.create_index(id_unique_index()).await?;
        log::info!("Successfully created indexes for sections and subsections collections");
        Ok(())
    }
}
