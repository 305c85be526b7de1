use async_graphql::{Context, Object, Result as GqlResult, ResultExt};

use crate::{
    graphql::helpers::{admin, app_state, caller},
    models::{
        domain::{Category, Question, ReportModel, Response, Section},
        dto::{request::QuestionFilter, response::ResponseDetail},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn categories(&self, ctx: &Context<'_>) -> GqlResult<Vec<Category>> {
        let state = app_state(ctx)?;
        caller(ctx)?;

        state.catalog_service.list_categories().await.extend()
    }

    async fn sections(
        &self,
        ctx: &Context<'_>,
        category_id: Option<String>,
    ) -> GqlResult<Vec<Section>> {
        let state = app_state(ctx)?;
        caller(ctx)?;

        state
            .catalog_service
            .list_sections(category_id.as_deref())
            .await
            .extend()
    }

    async fn surveys(
        &self,
        ctx: &Context<'_>,
        category_id: Option<String>,
        section_id: Option<String>,
    ) -> GqlResult<Vec<Question>> {
        let state = app_state(ctx)?;
        caller(ctx)?;

        let filter = QuestionFilter {
            category_id,
            section_id,
        };
        state.catalog_service.list_questions(&filter).await.extend()
    }

    async fn my_responses(&self, ctx: &Context<'_>) -> GqlResult<Vec<ResponseDetail>> {
        let state = app_state(ctx)?;
        let claims = caller(ctx)?;

        state
            .response_service
            .list_for_user(&claims.sub)
            .await
            .extend()
    }

    /// The caller's original entry and reattempts for one question.
    async fn response_history(
        &self,
        ctx: &Context<'_>,
        question_id: String,
    ) -> GqlResult<Vec<Response>> {
        let state = app_state(ctx)?;
        let claims = caller(ctx)?;

        state
            .response_service
            .history(&claims.sub, &question_id)
            .await
            .extend()
    }

    async fn report(&self, ctx: &Context<'_>, user_id: String) -> GqlResult<ReportModel> {
        let state = app_state(ctx)?;
        admin(ctx)?;

        state.report_service.build_report(&user_id).await.extend()
    }
}
