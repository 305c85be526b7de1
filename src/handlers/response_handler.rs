use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{ReportRequest, SubmitResponseRequest},
};

#[post("/response")]
pub async fn submit_response(
    state: web::Data<AppState>,
    request: web::Json<SubmitResponseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .response_service
        .submit(&auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/response")]
pub async fn list_responses(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let responses = state.response_service.list_all().await?;
    Ok(HttpResponse::Ok().json(responses))
}

#[get("/response/my-responses")]
pub async fn my_responses(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let responses = state.response_service.list_for_user(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(responses))
}

#[get("/response/history/{question_id}")]
pub async fn my_history(
    state: web::Data<AppState>,
    question_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let responses = state
        .response_service
        .history(&auth.0.sub, &question_id)
        .await?;
    Ok(HttpResponse::Ok().json(responses))
}

/// Builds the user's report and emails it to them.
#[post("/response/report-by-user")]
pub async fn send_report(
    state: web::Data<AppState>,
    request: web::Json<ReportRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let user_id = request.user_id()?;
    let receipt = state.report_service.send_report(user_id).await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[get("/response/report/{user_id}")]
pub async fn preview_report(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let report = state.report_service.build_report(&user_id).await?;
    Ok(HttpResponse::Ok().json(report))
}
