use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::QuizRepository,
    services::normalizer::{normalize_quiz, OPTION_COUNT},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        self.repository.list_quizzes(offset, limit).await
    }

    /// Normalize, validate, persist. Every creation path (manual form, model
    /// generation, trivia bank) converges here before anything is stored.
    pub async fn create_quiz(&self, quiz: Quiz) -> AppResult<Quiz> {
        let quiz = normalize_quiz(quiz);
        Self::validate_quiz(&quiz)?;
        self.repository.create(quiz).await
    }

    pub async fn update_quiz(&self, mut quiz: Quiz) -> AppResult<Quiz> {
        quiz = normalize_quiz(quiz);
        Self::validate_quiz(&quiz)?;
        quiz.updated_at = Some(Utc::now());
        self.repository.update(quiz).await
    }

    /// Hard delete; there is no soft-delete or versioning.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    /// The schema contract both the generation adapter and the manual form
    /// must satisfy before persistence.
    pub fn validate_quiz(quiz: &Quiz) -> AppResult<()> {
        if quiz.title.trim().is_empty() {
            return Err(AppError::Validation("quiz title must not be empty".to_string()));
        }

        if quiz.questions.is_empty() {
            return Err(AppError::Validation(
                "quiz must contain at least one question".to_string(),
            ));
        }

        if quiz.total_questions as usize != quiz.questions.len() {
            return Err(AppError::Validation(format!(
                "total_questions is {} but quiz has {} questions",
                quiz.total_questions,
                quiz.questions.len()
            )));
        }

        if let Some(duration) = quiz.duration_minutes {
            if duration <= 0 {
                return Err(AppError::Validation(
                    "duration_minutes must be a positive integer".to_string(),
                ));
            }
        }

        for (index, question) in quiz.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "question {} has empty text",
                    index
                )));
            }

            if question.options.len() != OPTION_COUNT {
                return Err(AppError::Validation(format!(
                    "question {} has {} options, expected {}",
                    index,
                    question.options.len(),
                    OPTION_COUNT
                )));
            }

            if question.correct_answers.is_empty() {
                return Err(AppError::Validation(format!(
                    "question {} has no correct answer",
                    index
                )));
            }

            for answer in &question.correct_answers {
                if !question.options.iter().any(|option| option == answer) {
                    return Err(AppError::Validation(format!(
                        "question {} marks '{}' correct but it is not one of the options",
                        index, answer
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{AccessTier, Difficulty, Question};

    fn valid_quiz() -> Quiz {
        Quiz::new(
            "Droit administratif",
            "Serie 1",
            "droit",
            Difficulty::Moyen,
            AccessTier::Free,
            Some(15),
            vec![Question {
                text: "Q1".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct_answers: vec!["A".to_string()],
                explanation: None,
            }],
        )
    }

    #[test]
    fn valid_quiz_passes_validation() {
        assert!(QuizService::validate_quiz(&valid_quiz()).is_ok());
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.questions.clear();
        quiz.total_questions = 0;

        assert!(matches!(
            QuizService::validate_quiz(&quiz),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn mismatched_total_questions_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.total_questions = 5;

        assert!(QuizService::validate_quiz(&quiz).is_err());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.duration_minutes = Some(0);

        assert!(QuizService::validate_quiz(&quiz).is_err());
    }

    #[test]
    fn untimed_quiz_is_accepted() {
        let mut quiz = valid_quiz();
        quiz.duration_minutes = None;

        assert!(QuizService::validate_quiz(&quiz).is_ok());
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.questions[0].options.pop();

        assert!(QuizService::validate_quiz(&quiz).is_err());
    }

    #[test]
    fn question_without_correct_answer_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.questions[0].correct_answers.clear();

        assert!(QuizService::validate_quiz(&quiz).is_err());
    }

    #[test]
    fn correct_answer_not_among_options_is_rejected() {
        let mut quiz = valid_quiz();
        quiz.questions[0].correct_answers = vec!["Z".to_string()];

        assert!(QuizService::validate_quiz(&quiz).is_err());
    }
}
