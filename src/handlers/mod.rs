pub mod catalog_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod response_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Routes mounted under the authenticated `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(catalog_handler::list_categories)
        .service(catalog_handler::create_category)
        .service(catalog_handler::list_sections)
        .service(catalog_handler::create_section)
        .service(catalog_handler::list_subsections)
        .service(catalog_handler::create_subsection)
        .service(catalog_handler::list_surveys)
        .service(catalog_handler::get_survey)
        .service(catalog_handler::create_survey)
        .service(catalog_handler::update_survey)
        .service(catalog_handler::delete_survey)
        .service(response_handler::my_responses)
        .service(response_handler::my_history)
        .service(response_handler::preview_report)
        .service(response_handler::send_report)
        .service(response_handler::submit_response)
        .service(response_handler::list_responses);
}

/// `POST /graphql`, behind the same bearer-token check as `/api`.
pub fn configure_graphql(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .wrap(AuthMiddleware)
            .route(web::post().to(graphql_handler::graphql)),
    );
}
