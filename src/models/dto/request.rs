use serde::{Deserialize, Serialize};
use validator::Validate;

use chrono::{DateTime, Utc};

use crate::models::domain::quiz::{AccessTier, Difficulty, Question, Quiz};

/// Where a generated quiz should come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizSource {
    #[default]
    Model,
    ExternalBank,
}

/// Body of `POST /api/quizzes/generate`. Field names are camelCase because
/// the web client sends them that way.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(range(min = 4, max = 15))]
    pub number_of_questions: i16,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub source: QuizSource,
}

/// Body of `POST /api/questions/generate`, the assist hook of the manual
/// quiz builder: regenerate one question without touching the rest.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    pub difficulty: Difficulty,
}

/// Manual authoring path. Question counts are taken exactly as produced;
/// shape invariants are still enforced by validation before persistence.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub access_type: AccessTier,

    pub duration_minutes: Option<i64>,

    #[serde(default)]
    pub is_mock_exam: bool,

    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1))]
    pub questions: Vec<QuestionInput>,

    #[serde(default)]
    pub created_by_user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl From<QuestionInput> for Question {
    fn from(input: QuestionInput) -> Self {
        Question {
            text: input.text,
            options: input.options,
            correct_answers: input.correct_answers,
            explanation: input.explanation,
        }
    }
}

impl CreateQuizRequest {
    pub fn into_quiz(self) -> Quiz {
        let mut quiz = Quiz::new(
            &self.title,
            &self.description,
            &self.category,
            self.difficulty,
            self.access_type,
            self.duration_minutes,
            self.questions.into_iter().map(Question::from).collect(),
        );
        quiz.is_mock_exam = self.is_mock_exam;
        quiz.scheduled_at = self.scheduled_at;
        quiz.created_by_user_id = self.created_by_user_id;
        quiz
    }
}

/// Body of `POST /api/quizzes/{id}/attempts`. `answers[i]` holds the option
/// texts selected for question `i`; an absent or empty entry means the
/// question was left unanswered.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1))]
    pub user_id: String,

    pub answers: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_page_limit")]
    pub limit: i64,
    #[serde(default)]
    pub quiz_id: Option<String>,
}

fn default_page_limit() -> i64 {
    20
}
