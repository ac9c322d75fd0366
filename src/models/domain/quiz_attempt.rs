use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one completed quiz run. Written once at submission
/// time and never updated or deleted by application logic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub total_questions: i64,
    pub correct_count: i64,
    pub score: i64,
    pub details: BTreeMap<String, AnswerDetail>,
    pub created_at: DateTime<Utc>,
}

/// Per-question breakdown, keyed in `QuizAttempt::details` by the question
/// index rendered as a string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerDetail {
    pub question: String,
    pub selected: Vec<String>,
    pub correct: Vec<String>,
    pub explanation: String,
}
