use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{
            CreateCategoryRequest, CreateQuestionRequest, CreateSectionRequest,
            CreateSubsectionRequest, QuestionFilter, SectionFilter, SubsectionFilter,
            UpdateQuestionRequest,
        },
        response::MessageResponse,
    },
};

#[get("/category")]
pub async fn list_categories(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/category")]
pub async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let category = state
        .catalog_service
        .create_category(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/section")]
pub async fn list_sections(
    state: web::Data<AppState>,
    query: web::Query<SectionFilter>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sections = state
        .catalog_service
        .list_sections(query.category_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(sections))
}

#[post("/section")]
pub async fn create_section(
    state: web::Data<AppState>,
    request: web::Json<CreateSectionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let section = state
        .catalog_service
        .create_section(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(section))
}

#[get("/subsection")]
pub async fn list_subsections(
    state: web::Data<AppState>,
    query: web::Query<SubsectionFilter>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let subsections = state
        .catalog_service
        .list_subsections(query.section_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(subsections))
}

#[post("/subsection")]
pub async fn create_subsection(
    state: web::Data<AppState>,
    request: web::Json<CreateSubsectionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let subsection = state
        .catalog_service
        .create_subsection(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(subsection))
}

#[get("/survey")]
pub async fn list_surveys(
    state: web::Data<AppState>,
    query: web::Query<QuestionFilter>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state.catalog_service.list_questions(&query).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/survey/{id}")]
pub async fn get_survey(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.catalog_service.get_question(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/survey")]
pub async fn create_survey(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .catalog_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[put("/survey/{id}")]
pub async fn update_survey(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .catalog_service
        .update_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/survey/{id}")]
pub async fn delete_survey(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.catalog_service.delete_question(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Survey deleted successfully")))
}
