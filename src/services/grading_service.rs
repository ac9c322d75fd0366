use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use uuid::Uuid;

use crate::models::domain::quiz_attempt::{AnswerDetail, QuizAttempt};
use crate::models::domain::{Question, Quiz};

/// Outcome of grading one full run. Pure data; persistence happens elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeReport {
    pub total_questions: usize,
    pub correct_count: usize,
    pub score: i64,
    pub details: BTreeMap<String, AnswerDetail>,
}

pub struct GradingService;

impl GradingService {
    /// Grade submitted answer sets against the quiz questions. A question is
    /// correct only when the selected set equals the correct set exactly:
    /// order-independent, no partial credit, and an empty selection against a
    /// non-empty correct set is wrong.
    pub fn grade(questions: &[Question], answers: &[BTreeSet<String>]) -> GradeReport {
        let mut correct_count = 0;
        let mut details = BTreeMap::new();

        for (index, question) in questions.iter().enumerate() {
            let selected = answers.get(index).cloned().unwrap_or_default();
            let correct: BTreeSet<String> = question.correct_answers.iter().cloned().collect();

            let is_correct = !correct.is_empty() && selected == correct;
            if is_correct {
                correct_count += 1;
            }

            details.insert(
                index.to_string(),
                AnswerDetail {
                    question: question.text.clone(),
                    selected: selected.into_iter().collect(),
                    correct: question.correct_answers.clone(),
                    explanation: question.explanation.clone().unwrap_or_default(),
                },
            );
        }

        GradeReport {
            total_questions: questions.len(),
            correct_count,
            score: Self::percentage(correct_count, questions.len()),
            details,
        }
    }

    /// Integer percentage, rounded (not truncated): 1/3 gives 33, 2/3 gives 67.
    pub fn percentage(correct_count: usize, total_questions: usize) -> i64 {
        if total_questions == 0 {
            return 0;
        }
        (100.0 * correct_count as f64 / total_questions as f64).round() as i64
    }

    /// Freeze a report into the immutable attempt record.
    pub fn build_attempt(user_id: &str, quiz: &Quiz, report: GradeReport) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            total_questions: report.total_questions as i64,
            correct_count: report.correct_count as i64,
            score: report.score,
            details: report.details,
            created_at: Utc::now(),
        }
    }
}
