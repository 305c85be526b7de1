use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CategoryRepository, MongoCategoryRepository, MongoQuestionRepository,
        MongoResponseRepository, MongoSectionRepository, MongoUserRepository, QuestionRepository,
        ResponseRepository, SectionRepository, UserRepository,
    },
    services::{
        CatalogService, HtmlReportRenderer, HttpMailTransport, MailTransport, ReportRenderer,
        ReportService, ResponseService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog_service: Arc<CatalogService>,
    pub response_service: Arc<ResponseService>,
    pub report_service: Arc<ReportService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        let categories = Arc::new(MongoCategoryRepository::new(&db));
        let sections = Arc::new(MongoSectionRepository::new(&db));
        let questions = Arc::new(MongoQuestionRepository::new(&db));
        let responses = Arc::new(MongoResponseRepository::new(&db));

        users.ensure_indexes().await?;
        categories.ensure_indexes().await?;
        sections.ensure_indexes().await?;
        questions.ensure_indexes().await?;
        responses.ensure_indexes().await?;

        let mailer = Arc::new(HttpMailTransport::new(&config)?);
        let renderer = Arc::new(HtmlReportRenderer::new(config.report_subject.clone()));

        Ok(Self::from_parts(
            db,
            config,
            Repositories {
                users,
                categories,
                sections,
                questions,
                responses,
            },
            renderer,
            mailer,
        ))
    }

    /// Wires services over already-constructed storage and delivery backends.
    pub fn from_parts(
        db: Database,
        config: Config,
        repos: Repositories,
        renderer: Arc<dyn ReportRenderer>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        let catalog_service = Arc::new(CatalogService::new(
            repos.categories.clone(),
            repos.sections.clone(),
            repos.questions.clone(),
        ));
        let response_service = Arc::new(ResponseService::new(
            repos.responses.clone(),
            repos.questions.clone(),
            repos.categories.clone(),
            repos.users.clone(),
        ));
        let report_service = Arc::new(ReportService::new(
            repos.users,
            repos.responses,
            repos.questions,
            repos.categories,
            repos.sections,
            renderer,
            mailer,
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            db,
            catalog_service,
            response_service,
            report_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}

pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub responses: Arc<dyn ResponseRepository>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
