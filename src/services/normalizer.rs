use crate::models::domain::{Question, Quiz};

/// Every question must end up with exactly this many options, whatever the
/// generation path produced.
pub const OPTION_COUNT: usize = 4;

/// Force a question into the canonical shape: pad short option lists with
/// empty strings, truncate long ones keeping the first four in their
/// original order, then drop correct-answer entries that no longer match a
/// surviving option. Correctness itself is trusted as given; a question left
/// with zero correct answers is rejected later by validation rather than
/// repaired here.
pub fn normalize_question(mut question: Question) -> Question {
    if question.options.len() > OPTION_COUNT {
        question.options.truncate(OPTION_COUNT);
    }
    while question.options.len() < OPTION_COUNT {
        question.options.push(String::new());
    }

    let Question {
        options,
        correct_answers,
        ..
    } = &mut question;
    correct_answers.retain(|answer| options.iter().any(|option| option == answer));

    question
}

/// Normalize every question and recompute the denormalized count.
pub fn normalize_quiz(mut quiz: Quiz) -> Quiz {
    quiz.questions = quiz.questions.into_iter().map(normalize_question).collect();
    quiz.total_questions = quiz.questions.len() as i64;
    quiz
}
