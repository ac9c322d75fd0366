use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz::Question;

/// Shape the generation service asks the model to produce. The JSON schema
/// derived from these types is sent with the request as the response
/// contract, so deserialization failures mean the model broke the contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratedQuiz {
    pub title: String,
    pub description: String,
    pub category: String,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratedQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub explanation: Option<String>,
}

impl From<GeneratedQuestion> for Question {
    fn from(generated: GeneratedQuestion) -> Self {
        Question {
            text: generated.text,
            options: generated.options,
            correct_answers: generated.correct_answers,
            explanation: generated.explanation,
        }
    }
}
