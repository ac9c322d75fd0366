use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use concours_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    // Surfaces gateway permission failures apart from request-level errors.
    state.permission_events.spawn_logger();

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::generate_quiz)
            .service(handlers::generate_question)
            .service(handlers::list_quizzes)
            .service(handlers::create_quiz)
            .service(handlers::get_quiz)
            .service(handlers::delete_quiz)
            .service(handlers::submit_attempt)
            .service(handlers::get_attempt)
            .service(handlers::get_user_attempts)
    })
    .bind((host, port))?
    .run()
    .await
}
