use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty levels as exposed on the wire, ordered easiest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facile,
    Moyen,
    Difficile,
}

impl Difficulty {
    /// Difficulty label understood by the public trivia bank.
    pub fn trivia_level(&self) -> &'static str {
        match self {
            Difficulty::Facile => "easy",
            Difficulty::Moyen => "medium",
            Difficulty::Difficile => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Facile => write!(f, "facile"),
            Difficulty::Moyen => write!(f, "moyen"),
            Difficulty::Difficile => write!(f, "difficile"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    #[default]
    Free,
    Premium,
}

/// One multiple-select item. Options are positionally labeled A-D in the UI
/// but carry no semantic order; correct answers are matched by exact text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub access_type: AccessTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>, // None means untimed
    #[serde(default)]
    pub is_mock_exam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<String>,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        category: &str,
        difficulty: Difficulty,
        access_type: AccessTier,
        duration_minutes: Option<i64>,
        questions: Vec<Question>,
    ) -> Self {
        let total_questions = questions.len() as i64;
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            difficulty,
            access_type,
            duration_minutes,
            is_mock_exam: false,
            scheduled_at: None,
            questions,
            total_questions,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            created_by_user_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Facile).expect("difficulty should serialize");
        assert_eq!(json, "\"facile\"");

        let parsed: Difficulty =
            serde_json::from_str("\"difficile\"").expect("difficulty should deserialize");
        assert_eq!(parsed, Difficulty::Difficile);
    }

    #[test]
    fn difficulty_rejects_unknown_level() {
        let parsed = serde_json::from_str::<Difficulty>("\"expert\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn difficulty_maps_to_trivia_levels() {
        assert_eq!(Difficulty::Facile.trivia_level(), "easy");
        assert_eq!(Difficulty::Moyen.trivia_level(), "medium");
        assert_eq!(Difficulty::Difficile.trivia_level(), "hard");
    }

    #[test]
    fn access_tier_defaults_to_free() {
        assert_eq!(AccessTier::default(), AccessTier::Free);
    }

    #[test]
    fn quiz_new_counts_questions() {
        let quiz = Quiz::new(
            "Droit constitutionnel",
            "Revision du titre II",
            "droit",
            Difficulty::Moyen,
            AccessTier::Free,
            Some(10),
            vec![Question {
                text: "Question".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct_answers: vec!["A".to_string()],
                explanation: None,
            }],
        );

        assert_eq!(quiz.total_questions, 1);
        assert_eq!(quiz.total_questions as usize, quiz.questions.len());
        assert!(!quiz.id.is_empty());
        assert!(quiz.created_at.is_some());
    }

    #[test]
    fn quiz_round_trip_serialization() {
        let quiz = Quiz::new(
            "Culture generale",
            "Serie 3",
            "culture",
            Difficulty::Facile,
            AccessTier::Premium,
            None,
            vec![Question {
                text: "Capitale du Burkina Faso ?".to_string(),
                options: vec![
                    "Ouagadougou".to_string(),
                    "Bobo-Dioulasso".to_string(),
                    "Koudougou".to_string(),
                    "Banfora".to_string(),
                ],
                correct_answers: vec!["Ouagadougou".to_string()],
                explanation: Some("Ouagadougou est la capitale.".to_string()),
            }],
        );

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(parsed, quiz);
        assert_eq!(parsed.access_type, AccessTier::Premium);
        assert!(parsed.duration_minutes.is_none());
    }
}
