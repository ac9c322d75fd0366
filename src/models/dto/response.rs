use serde::Serialize;

use crate::models::domain::{Question, Quiz, QuizAttempt};

/// Success body of `POST /api/quizzes/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: Quiz,
}

/// Success body of the single-question assist endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionResponse {
    pub question: Question,
}

/// Failure body shared by every error kind on the generate endpoint. The
/// transport collapses all failures to one status code; callers read the
/// message to decide remediation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptListResponse {
    pub attempts: Vec<QuizAttempt>,
    pub total: i64,
}
