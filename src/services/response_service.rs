use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Category, Question, Response, User},
        dto::{request::SubmitResponseRequest, response::ResponseDetail},
    },
    repositories::{CategoryRepository, QuestionRepository, ResponseRepository, UserRepository},
};

/// Accepts survey submissions into the response ledger and reads them back.
pub struct ResponseService {
    responses: Arc<dyn ResponseRepository>,
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl ResponseService {
    pub fn new(
        responses: Arc<dyn ResponseRepository>,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            responses,
            questions,
            categories,
            users,
        }
    }

    /// Validates and records one submission on behalf of `caller_id`.
    ///
    /// A user holds at most one non-reattempt entry per question. The lookup
    /// here rejects the common case early; the storage layer's unique index
    /// settles concurrent submissions, and its conflict is passed through.
    pub async fn submit(&self, caller_id: &str, request: SubmitResponseRequest) -> AppResult<Response> {
        let submission = request.into_submission()?;

        if submission.user_id != caller_id {
            return Err(AppError::Forbidden(
                "Unauthorized to submit response for another user".to_string(),
            ));
        }

        let question = self
            .questions
            .find_by_id(&submission.question_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))?;

        if !question.accepts_answer(&submission.answer) {
            return Err(AppError::ValidationError("Invalid answer".to_string()));
        }

        if !submission.reattempt
            && self
                .responses
                .find_original(&submission.user_id, &submission.question_id)
                .await?
                .is_some()
        {
            return Err(AppError::Conflict(
                "Response already submitted for this survey".to_string(),
            ));
        }

        let response = Response::new(
            &submission.user_id,
            &submission.question_id,
            &submission.answer,
            submission.score,
            submission.reattempt,
            submission.file_url,
        );
        let response = self.responses.create(response).await?;

        log::info!(
            "Recorded response {} for user {} on question {} (reattempt: {})",
            response.id,
            response.user_id,
            response.question_id,
            response.is_reattempt
        );

        Ok(response)
    }

    /// Every entry a user has for a question, original and reattempts alike.
    pub async fn history(&self, user_id: &str, question_id: &str) -> AppResult<Vec<Response>> {
        self.responses
            .find_by_user_and_question(user_id, question_id)
            .await
    }

    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ResponseDetail>> {
        let responses = self.responses.find_by_user(user_id).await?;
        self.with_details(responses).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<ResponseDetail>> {
        let responses = self.responses.find_all().await?;
        self.with_details(responses).await
    }

    async fn with_details(&self, responses: Vec<Response>) -> AppResult<Vec<ResponseDetail>> {
        if responses.is_empty() {
            return Ok(vec![]);
        }

        let question_ids = distinct(responses.iter().map(|r| r.question_id.clone()));
        let user_ids = distinct(responses.iter().map(|r| r.user_id.clone()));

        let questions: HashMap<String, Question> = self
            .questions
            .find_by_ids(&question_ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        let category_ids = distinct(questions.values().map(|q| q.category_id.clone()));
        let categories: HashMap<String, Category> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let users: HashMap<String, User> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(responses
            .into_iter()
            .map(|response| {
                let question = questions.get(&response.question_id).cloned();
                let category = question
                    .as_ref()
                    .and_then(|q| categories.get(&q.category_id))
                    .cloned();
                ResponseDetail {
                    user_email: users.get(&response.user_id).map(|u| u.email.clone()),
                    question,
                    category,
                    response,
                }
            })
            .collect())
    }
}

fn distinct(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut ids: Vec<String> = ids.collect();
    ids.sort();
    ids.dedup();
    ids
}
