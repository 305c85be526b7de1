#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::Client;
use tokio::sync::{Mutex, RwLock};

use survey_server::{
    app_state::{AppState, Repositories},
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Category, Question, Response, Section, Subsection, User},
    repositories::{
        CategoryRepository, QuestionRepository, ResponseRepository, SectionRepository,
        UserRepository,
    },
    services::{
        mailer::{MailTransport, OutgoingMail},
        HtmlReportRenderer,
    },
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> AppResult<Category> {
        self.categories.write().await.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.iter().find(|c| c.name == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.read().await.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySectionRepository {
    sections: RwLock<Vec<Section>>,
    subsections: RwLock<Vec<Subsection>>,
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn create_section(&self, section: Section) -> AppResult<Section> {
        self.sections.write().await.push(section.clone());
        Ok(section)
    }

    async fn find_section_by_id(&self, id: &str) -> AppResult<Option<Section>> {
        Ok(self.sections.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_sections_by_ids(&self, ids: &[String]) -> AppResult<Vec<Section>> {
        Ok(self
            .sections
            .read()
            .await
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn find_sections(&self) -> AppResult<Vec<Section>> {
        Ok(self.sections.read().await.clone())
    }

    async fn find_sections_by_category(&self, category_id: &str) -> AppResult<Vec<Section>> {
        Ok(self
            .sections
            .read()
            .await
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_subsection(&self, subsection: Subsection) -> AppResult<Subsection> {
        self.subsections.write().await.push(subsection.clone());
        Ok(subsection)
    }

    async fn find_subsections(&self) -> AppResult<Vec<Subsection>> {
        Ok(self.subsections.read().await.clone())
    }

    async fn find_subsections_by_section(&self, section_id: &str) -> AppResult<Vec<Subsection>> {
        Ok(self
            .subsections
            .read()
            .await
            .iter()
            .filter(|s| s.section_id == section_id)
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        Ok(self.questions.read().await.clone())
    }

    async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_section(&self, section_id: &str) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| q.section_id.as_deref() == Some(section_id))
            .cloned()
            .collect())
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let slot = questions
            .iter_mut()
            .find(|q| q.id == question.id)
            .ok_or_else(|| AppError::NotFound(format!("Survey with id '{}' not found", question.id)))?;
        *slot = question.clone();
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(AppError::NotFound(format!("Survey with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Enforces the same rule as the partial unique index: one non-reattempt
/// entry per (user, question), checked under the write lock.
#[derive(Default)]
pub struct InMemoryResponseRepository {
    responses: RwLock<Vec<Response>>,
}

impl InMemoryResponseRepository {
    pub async fn len(&self) -> usize {
        self.responses.read().await.len()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn create(&self, response: Response) -> AppResult<Response> {
        let mut responses = self.responses.write().await;
        let duplicate = !response.is_reattempt
            && responses.iter().any(|r| {
                !r.is_reattempt
                    && r.user_id == response.user_id
                    && r.question_id == response.question_id
            });
        if duplicate {
            return Err(AppError::Conflict(
                "Response already submitted for this survey".to_string(),
            ));
        }
        responses.push(response.clone());
        Ok(response)
    }

    async fn find_original(&self, user_id: &str, question_id: &str) -> AppResult<Option<Response>> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .find(|r| !r.is_reattempt && r.user_id == user_id && r.question_id == question_id)
            .cloned())
    }

    async fn find_by_user_and_question(
        &self,
        user_id: &str,
        question_id: &str,
    ) -> AppResult<Vec<Response>> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id && r.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Response>> {
        let mut responses: Vec<Response> = self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.created_at);
        Ok(responses)
    }

    async fn find_all(&self) -> AppResult<Vec<Response>> {
        let mut responses = self.responses.read().await.clone();
        responses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(responses)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Keeps every message it is handed, or refuses all of them.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        if self.fail {
            return Err(AppError::DeliveryError("relay unavailable".to_string()));
        }
        self.sent.lock().await.push(mail);
        Ok(())
    }
}

/// In-memory backends shared between a test and the services under test.
#[derive(Clone, Default)]
pub struct Backends {
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub sections: Arc<InMemorySectionRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub responses: Arc<InMemoryResponseRepository>,
    pub mailer: Arc<RecordingMailer>,
}

impl Backends {
    pub fn with_mailer(mailer: RecordingMailer) -> Self {
        Self {
            mailer: Arc::new(mailer),
            ..Default::default()
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: self.users.clone(),
            categories: self.categories.clone(),
            sections: self.sections.clone(),
            questions: self.questions.clone(),
            responses: self.responses.clone(),
        }
    }

    /// Services wired over these backends. The mongo client is never used;
    /// building it only parses the URI.
    pub async fn app_state(&self) -> AppState {
        let config = Config::test_config();
        let client = Client::with_uri_str(&config.mongo_conn_string)
            .await
            .expect("connection string parses");
        let db = Database::from_client(client, &config.mongo_db_name);
        let renderer = Arc::new(HtmlReportRenderer::new(config.report_subject.clone()));

        AppState::from_parts(db, config, self.repositories(), renderer, self.mailer.clone())
    }

    pub async fn seed_user(&self, email: &str, role: survey_server::models::domain::user::UserRole) -> User {
        self.users
            .create(User::new(email, role))
            .await
            .expect("user is stored")
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        self.categories
            .create(Category::new(name))
            .await
            .expect("category is stored")
    }

    pub async fn seed_question(&self, category_id: &str, max_score: Option<f64>) -> Question {
        let mut question = Question::new(
            "2 + 2?",
            vec!["3".to_string(), "4".to_string()],
            category_id,
        );
        question.correct_option = Some("4".to_string());
        question.max_score = max_score;
        self.questions
            .create(question)
            .await
            .expect("question is stored")
    }
}
