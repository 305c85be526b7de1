use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use survey_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    graphql::create_schema,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if !cfg!(debug_assertions) {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let schema = create_schema(state.clone());
    let jwt_service = web::Data::from(state.jwt_service.clone());
    let state = web::Data::new(state);
    let schema = web::Data::new(schema);

    log::info!("Starting survey server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(schema.clone())
            .app_data(jwt_service.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(handlers::configure_api),
            )
            .configure(handlers::configure_graphql)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
