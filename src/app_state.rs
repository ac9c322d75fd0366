use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizAttemptRepository, MongoQuizRepository, MongoUserProfileRepository},
    services::{
        attempt_service::AttemptService, generation_service::GenerationService,
        permission_listener::PermissionEvents, quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub generation_service: Arc<GenerationService>,
    pub permission_events: PermissionEvents,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let database = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&database));
        quiz_repository.ensure_indexes().await?;
        let quiz_service = Arc::new(QuizService::new(quiz_repository));

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&database));
        attempt_repository.ensure_indexes().await?;

        let profile_repository = Arc::new(MongoUserProfileRepository::new(&database));
        profile_repository.ensure_indexes().await?;

        let attempt_service = Arc::new(AttemptService::new(attempt_repository, profile_repository));

        let generation_service = Arc::new(GenerationService::new(&config));

        Ok(Self {
            database,
            quiz_service,
            attempt_service,
            generation_service,
            permission_events: PermissionEvents::new(),
            config: Arc::new(config),
        })
    }
}
