use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Category, Question, Section, Subsection, CURRENT_SCHEMA_VERSION},
        dto::request::{
            CreateCategoryRequest, CreateQuestionRequest, CreateSectionRequest,
            CreateSubsectionRequest, QuestionFilter, UpdateQuestionRequest,
        },
    },
    repositories::{CategoryRepository, QuestionRepository, SectionRepository},
};

/// Admin maintenance of the question catalog and its grouping hierarchy.
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    sections: Arc<dyn SectionRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        sections: Arc<dyn SectionRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            sections,
            questions,
        }
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        request.validate()?;
        let category = Category::new(&request.name);
        if category.name.is_empty() {
            return Err(AppError::ValidationError(
                "Category name is required".to_string(),
            ));
        }

        if self.categories.find_by_name(&category.name).await?.is_some() {
            return Err(AppError::Conflict("Category already exists".to_string()));
        }

        let category = self.categories.create(category).await?;
        log::info!("Created category {} ({})", category.name, category.id);
        Ok(category)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    pub async fn create_section(&self, request: CreateSectionRequest) -> AppResult<Section> {
        request.validate()?;
        self.categories
            .find_by_id(&request.category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let section = self
            .sections
            .create_section(Section::new(&request.name, &request.category_id))
            .await?;
        log::info!("Created section {} in category {}", section.id, section.category_id);
        Ok(section)
    }

    pub async fn list_sections(&self, category_id: Option<&str>) -> AppResult<Vec<Section>> {
        match category_id {
            Some(id) => self.sections.find_sections_by_category(id).await,
            None => self.sections.find_sections().await,
        }
    }

    pub async fn create_subsection(&self, request: CreateSubsectionRequest) -> AppResult<Subsection> {
        request.validate()?;
        self.sections
            .find_section_by_id(&request.section_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

        self.sections
            .create_subsection(Subsection::new(&request.name, &request.section_id))
            .await
    }

    pub async fn list_subsections(&self, section_id: Option<&str>) -> AppResult<Vec<Subsection>> {
        match section_id {
            Some(id) => self.sections.find_subsections_by_section(id).await,
            None => self.sections.find_subsections().await,
        }
    }

    pub async fn get_question(&self, id: &str) -> AppResult<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))
    }

    /// Section filter wins over category filter when both are given.
    pub async fn list_questions(&self, filter: &QuestionFilter) -> AppResult<Vec<Question>> {
        match (filter.section_id.as_deref(), filter.category_id.as_deref()) {
            (Some(section_id), _) => self.questions.find_by_section(section_id).await,
            (None, Some(category_id)) => self.questions.find_by_category(category_id).await,
            (None, None) => self.questions.find_all().await,
        }
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;

        let mut question = Question::new(&request.question, request.options, &request.category_id);
        question.correct_option = request.correct_option;
        question.question_type = request.question_type.unwrap_or_default();
        question.scoring_type = request.scoring_type.unwrap_or_default();
        question.max_score = request.max_score;
        question.section_id = request.section_id;
        question.subsection_id = request.subsection_id;
        question.file_url = request.file_url.filter(|url| !url.trim().is_empty());
        question.check_invariants()?;
        self.check_placement(&question).await?;

        let question = self.questions.create(question).await?;
        log::info!("Created survey question {}", question.id);
        Ok(question)
    }

    /// Applies the present fields and re-checks the whole record. Stored
    /// legacy documents are upgraded to the current schema on write.
    pub async fn update_question(&self, id: &str, request: UpdateQuestionRequest) -> AppResult<Question> {
        request.validate()?;
        let mut question = self.get_question(id).await?;

        if let Some(text) = request.question {
            question.question = text;
        }
        if let Some(options) = request.options {
            question.options = options;
        }
        if let Some(correct) = request.correct_option {
            question.correct_option = Some(correct);
        }
        if let Some(question_type) = request.question_type {
            question.question_type = question_type;
        }
        if let Some(scoring_type) = request.scoring_type {
            question.scoring_type = scoring_type;
        }
        if let Some(max) = request.max_score {
            question.max_score = Some(max);
        }
        if let Some(category_id) = request.category_id {
            question.category_id = category_id;
        }
        if let Some(section_id) = request.section_id {
            question.section_id = Some(section_id);
        }
        if let Some(subsection_id) = request.subsection_id {
            question.subsection_id = Some(subsection_id);
        }
        if let Some(file_url) = request.file_url {
            question.file_url = Some(file_url);
        }
        question.schema_version = CURRENT_SCHEMA_VERSION;
        question.modified_at = Some(Utc::now());

        question.check_invariants()?;
        self.check_placement(&question).await?;

        let question = self.questions.update(question).await?;
        log::info!("Updated survey question {}", question.id);
        Ok(question)
    }

    /// Removes a question. Responses referencing it stay in the ledger and
    /// are skipped when reports are built.
    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        self.questions.delete(id).await?;
        log::info!("Deleted survey question {}", id);
        Ok(())
    }

    async fn check_placement(&self, question: &Question) -> AppResult<()> {
        self.categories
            .find_by_id(&question.category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if let Some(section_id) = &question.section_id {
            let section = self
                .sections
                .find_section_by_id(section_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;
            if section.category_id != question.category_id {
                return Err(AppError::ValidationError(
                    "Section does not belong to the question's category".to_string(),
                ));
            }
        }
        Ok(())
    }
}
