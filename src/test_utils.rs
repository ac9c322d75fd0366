use crate::models::domain::{AccessTier, Difficulty, Question, Quiz, UserProfile};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Four-option question with a single correct answer.
    pub fn test_question(text: &str, correct: &str) -> Question {
        Question {
            text: text.to_string(),
            options: vec![
                correct.to_string(),
                "Distracteur 1".to_string(),
                "Distracteur 2".to_string(),
                "Distracteur 3".to_string(),
            ],
            correct_answers: vec![correct.to_string()],
            explanation: None,
        }
    }

    /// Free, untimed three-question quiz.
    pub fn test_quiz() -> Quiz {
        Quiz::new(
            "Concours blanc",
            "Entrainement",
            "culture",
            Difficulty::Moyen,
            AccessTier::Free,
            None,
            vec![
                test_question("Q1", "R1"),
                test_question("Q2", "R2"),
                test_question("Q3", "R3"),
            ],
        )
    }

    pub fn premium_quiz() -> Quiz {
        let mut quiz = test_quiz();
        quiz.access_type = AccessTier::Premium;
        quiz
    }

    pub fn free_profile(id: &str) -> UserProfile {
        UserProfile::free(id, "Candidate")
    }

    pub fn premium_profile(id: &str) -> UserProfile {
        let mut profile = free_profile(id);
        profile.subscription.tier = AccessTier::Premium;
        profile
    }
}
