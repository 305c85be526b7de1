use async_graphql::{Context, Object, Result as GqlResult, ResultExt};

use crate::{
    graphql::helpers::{admin, app_state, caller},
    models::{
        domain::{Category, Response},
        dto::{
            request::{CreateCategoryRequest, ReportRequest, SubmitResponseRequest},
            response::ReportDeliveryReceipt,
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_response(
        &self,
        ctx: &Context<'_>,
        input: SubmitResponseRequest,
    ) -> GqlResult<Response> {
        let state = app_state(ctx)?;
        let claims = caller(ctx)?;

        state
            .response_service
            .submit(&claims.sub, input)
            .await
            .extend()
    }

    async fn send_report(
        &self,
        ctx: &Context<'_>,
        input: ReportRequest,
    ) -> GqlResult<ReportDeliveryReceipt> {
        let state = app_state(ctx)?;
        admin(ctx)?;

        let user_id = input.user_id().extend()?;
        state.report_service.send_report(user_id).await.extend()
    }

    async fn create_category(
        &self,
        ctx: &Context<'_>,
        input: CreateCategoryRequest,
    ) -> GqlResult<Category> {
        let state = app_state(ctx)?;
        admin(ctx)?;

        state.catalog_service.create_category(input).await.extend()
    }
}
