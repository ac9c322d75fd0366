use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AccessTier, Quiz, QuizAttempt},
    repositories::{QuizAttemptRepository, UserProfileRepository},
    services::grading_service::GradingService,
};

/// Grades a submitted run and records the attempt. Grading itself stays
/// pure in `GradingService`; this service adds the access gate and the
/// single, fallible persistence step.
pub struct AttemptService {
    attempts: Arc<dyn QuizAttemptRepository>,
    profiles: Arc<dyn UserProfileRepository>,
}

impl AttemptService {
    pub fn new(
        attempts: Arc<dyn QuizAttemptRepository>,
        profiles: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self { attempts, profiles }
    }

    pub async fn submit_attempt(
        &self,
        user_id: &str,
        quiz: &Quiz,
        selections: Vec<Vec<String>>,
    ) -> AppResult<QuizAttempt> {
        if quiz.access_type == AccessTier::Premium {
            let has_access = self
                .profiles
                .find_by_id(user_id)
                .await?
                .is_some_and(|profile| profile.has_premium_access());

            if !has_access {
                return Err(AppError::Permission(format!(
                    "quiz '{}' requires a premium subscription",
                    quiz.id
                )));
            }
        }

        let answers: Vec<BTreeSet<String>> = selections
            .into_iter()
            .map(|selected| selected.into_iter().collect())
            .collect();

        let report = GradingService::grade(&quiz.questions, &answers);
        let attempt = GradingService::build_attempt(user_id, quiz, report);

        self.attempts.create(attempt).await
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<QuizAttempt> {
        self.attempts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))
    }

    pub async fn get_user_attempts(
        &self,
        user_id: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        self.attempts
            .get_user_attempts(user_id, quiz_id, offset, limit)
            .await
    }
}
