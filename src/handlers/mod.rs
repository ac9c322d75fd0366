pub mod attempt_handler;
pub mod quiz_handler;

pub use attempt_handler::{get_attempt, get_user_attempts, submit_attempt};
pub use quiz_handler::{
    create_quiz, delete_quiz, generate_question, generate_quiz, get_quiz, health_check,
    list_quizzes,
};
