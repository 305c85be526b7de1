use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            report::{percentage, CategoryReport, QuestionEntry, UNCATEGORIZED},
            Category, Question, ReportModel, Response, Section, User,
        },
        dto::response::ReportDeliveryReceipt,
    },
    repositories::{CategoryRepository, QuestionRepository, ResponseRepository, SectionRepository, UserRepository},
    services::{
        mailer::{MailTransport, OutgoingMail},
        report_renderer::ReportRenderer,
    },
    utils::html::{strip_markup, strip_markup_or},
};

/// A ledger entry together with whatever catalog rows it still resolves to.
#[derive(Debug, Clone)]
pub struct JoinedResponse {
    pub response: Response,
    pub question: Option<Question>,
    pub category: Option<Category>,
    pub section: Option<Section>,
}

/// Insertion-ordered accumulation of category buckets keyed by display name.
#[derive(Debug, Default)]
struct ReportBuilder {
    buckets: Vec<CategoryReport>,
    index: HashMap<String, usize>,
}

impl ReportBuilder {
    fn add(&mut self, category: String, entry: QuestionEntry) {
        let slot = match self.index.get(&category) {
            Some(&slot) => slot,
            None => {
                self.buckets.push(CategoryReport {
                    name: category.clone(),
                    score: 0.0,
                    total: 0,
                    questions: Vec::new(),
                });
                let slot = self.buckets.len() - 1;
                self.index.insert(category, slot);
                slot
            }
        };

        let bucket = &mut self.buckets[slot];
        bucket.score += entry.score;
        bucket.total += 1;
        bucket.questions.push(entry);
    }

    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn finish(self, user_email: String) -> ReportModel {
        let total_score = self.buckets.iter().map(|b| b.score).sum();
        let total_possible = self.buckets.iter().map(|b| b.total).sum();

        ReportModel {
            user_email,
            total_score,
            total_possible,
            percentage: percentage(total_score, total_possible),
            categories: self.buckets,
        }
    }
}

/// Folds joined responses into a report. Entries whose question no longer
/// exists are skipped; if nothing is left the user has no reportable data.
pub fn aggregate(user_email: &str, rows: Vec<JoinedResponse>) -> AppResult<ReportModel> {
    let mut builder = ReportBuilder::default();

    for row in rows {
        let Some(question) = row.question else {
            log::warn!(
                "Skipping response {} of user {}: question {} no longer exists",
                row.response.id,
                row.response.user_id,
                row.response.question_id
            );
            continue;
        };

        let category = strip_markup_or(row.category.as_ref().map(|c| c.name.as_str()), UNCATEGORIZED);
        let entry = QuestionEntry {
            question: strip_markup_or(Some(question.question.as_str()), "N/A"),
            answer: strip_markup_or(Some(row.response.answer.as_str()), "No answer"),
            correct_option: strip_markup_or(question.correct_option.as_deref(), "N/A"),
            section: row
                .section
                .as_ref()
                .map(|s| strip_markup(&s.name))
                .filter(|name| !name.trim().is_empty()),
            max_score: question.max_score,
            score: question.award(row.response.score),
        };

        builder.add(category, entry);
    }

    if builder.is_empty() {
        return Err(AppError::NotFound(
            "No valid responses found for this user".to_string(),
        ));
    }

    Ok(builder.finish(strip_markup(user_email)))
}

/// Builds score reports from the response ledger and mails them out.
pub struct ReportService {
    users: Arc<dyn UserRepository>,
    responses: Arc<dyn ResponseRepository>,
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    sections: Arc<dyn SectionRepository>,
    renderer: Arc<dyn ReportRenderer>,
    mailer: Arc<dyn MailTransport>,
}

impl ReportService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        responses: Arc<dyn ResponseRepository>,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        sections: Arc<dyn SectionRepository>,
        renderer: Arc<dyn ReportRenderer>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            users,
            responses,
            questions,
            categories,
            sections,
            renderer,
            mailer,
        }
    }

    pub async fn build_report(&self, user_id: &str) -> AppResult<ReportModel> {
        let user = self.find_user(user_id).await?;
        self.build_for(&user).await
    }

    /// Builds, renders and mails the report. Computation errors come back
    /// unchanged; a transport failure is always `AppError::DeliveryError`.
    pub async fn send_report(&self, user_id: &str) -> AppResult<ReportDeliveryReceipt> {
        let user = self.find_user(user_id).await?;
        let report = self.build_for(&user).await?;
        let rendered = self.renderer.render(&report);

        self.mailer
            .send(OutgoingMail {
                to: user.email.clone(),
                subject: rendered.subject,
                html: rendered.html,
            })
            .await
            .map_err(|e| {
                log::error!("Report for user {} computed but not delivered: {}", user.id, e);
                match e {
                    AppError::DeliveryError(_) => e,
                    other => AppError::DeliveryError(other.to_string()),
                }
            })?;

        log::info!("Report sent to user {}", user.id);

        Ok(ReportDeliveryReceipt {
            recipient: report.user_email.clone(),
            message: "Report sent successfully".to_string(),
            report,
        })
    }

    async fn find_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn build_for(&self, user: &User) -> AppResult<ReportModel> {
        let responses = self.responses.find_by_user(&user.id).await?;
        if responses.is_empty() {
            return Err(AppError::NotFound(
                "No responses found for this user".to_string(),
            ));
        }

        let rows = self.join(responses).await?;
        aggregate(&user.email, rows)
    }

    /// Resolves each response's question, category and section in three
    /// batched lookups. Missing rows stay `None`.
    async fn join(&self, responses: Vec<Response>) -> AppResult<Vec<JoinedResponse>> {
        let question_ids = unique(responses.iter().map(|r| r.question_id.as_str()));
        let questions: HashMap<String, Question> = self
            .questions
            .find_by_ids(&question_ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        let category_ids = unique(questions.values().map(|q| q.category_id.as_str()));
        let categories: HashMap<String, Category> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let section_ids = unique(questions.values().filter_map(|q| q.section_id.as_deref()));
        let sections: HashMap<String, Section> = self
            .sections
            .find_sections_by_ids(&section_ids)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        Ok(responses
            .into_iter()
            .map(|response| {
                let question = questions.get(&response.question_id).cloned();
                let category = question
                    .as_ref()
                    .and_then(|q| categories.get(&q.category_id))
                    .cloned();
                let section = question
                    .as_ref()
                    .and_then(|q| q.section_id.as_ref())
                    .and_then(|id| sections.get(id))
                    .cloned();
                JoinedResponse {
                    response,
                    question,
                    category,
                    section,
                }
            })
            .collect())
    }
}

fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}
