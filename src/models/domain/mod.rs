pub mod quiz;
pub mod quiz_attempt;
pub mod user_profile;

pub use quiz::{AccessTier, Difficulty, Question, Quiz};
pub use quiz_attempt::{AnswerDetail, QuizAttempt};
pub use user_profile::{SubscriptionPlan, UserProfile};
