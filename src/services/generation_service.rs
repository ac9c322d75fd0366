use async_openai::{config::OpenAIConfig, Client};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    constants::quiz_prompt::{quiz_instruction, single_question_instruction, QUIZ_GENERATION_PROMPT},
    errors::{AppError, AppResult},
    models::domain::{AccessTier, Difficulty, Question, Quiz},
    models::dto::generation::GeneratedQuiz,
    models::dto::request::{GenerateQuizRequest, QuizSource},
    services::normalizer::{normalize_question, normalize_quiz},
};

/// Models frequently wrap structured output in a Markdown code fence even
/// when told not to; strip it before parsing.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
});

/// Obtains quizzes either from the generative model or from the public
/// trivia bank. Outbound network only; persistence belongs to the caller.
/// Failures are typed and terminal, no retries.
pub struct GenerationService {
    openai: Client<OpenAIConfig>,
    http: reqwest::Client,
    model: String,
    trivia_api_url: String,
    trivia_category: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: i32,
    results: Vec<TriviaRecord>,
}

/// Flat record shape served by the question bank.
#[derive(Debug, Deserialize)]
struct TriviaRecord {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl GenerationService {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(api_base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Self {
            openai: Client::with_config(openai_config),
            http: reqwest::Client::new(),
            model: config.openai_model.clone(),
            trivia_api_url: config.trivia_api_url.clone(),
            trivia_category: config.trivia_category,
        }
    }

    pub async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Quiz> {
        let quiz = match request.source {
            QuizSource::Model => {
                self.generate_from_model(&request.topic, request.difficulty, request.number_of_questions)
                    .await?
            }
            QuizSource::ExternalBank => {
                self.generate_from_trivia(&request.topic, request.difficulty, request.number_of_questions)
                    .await?
            }
        };

        Ok(normalize_quiz(quiz))
    }

    /// Refresh one question of an otherwise manually authored quiz.
    pub async fn generate_single_question(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> AppResult<Question> {
        let generated = self
            .request_generated_quiz(&single_question_instruction(topic, &difficulty))
            .await?;

        let question = generated
            .questions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Generation("model returned no usable content".to_string()))?;

        Ok(normalize_question(Question::from(question)))
    }

    async fn generate_from_model(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: i16,
    ) -> AppResult<Quiz> {
        let generated = self
            .request_generated_quiz(&quiz_instruction(topic, &difficulty, count))
            .await?;

        let questions: Vec<Question> = generated.questions.into_iter().map(Question::from).collect();

        Ok(Quiz::new(
            &generated.title,
            &generated.description,
            &generated.category,
            difficulty,
            AccessTier::Free,
            None,
            questions,
        ))
    }

    /// One chat-completions call with the quiz schema attached as the
    /// response contract.
    async fn request_generated_quiz(&self, instruction: &str) -> AppResult<GeneratedQuiz> {
        let schema = serde_json::to_value(schemars::schema_for!(GeneratedQuiz))
            .map_err(|err| AppError::Internal(format!("quiz schema serialization failed: {err}")))?;

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": QUIZ_GENERATION_PROMPT },
                { "role": "user", "content": instruction }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "generated_quiz",
                    "schema": schema,
                    "strict": true
                }
            }
        });

        let response: serde_json::Value = self.openai.chat().create_byot(payload).await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Generation("model returned no usable content".to_string()))?;

        serde_json::from_str(strip_code_fences(content)).map_err(|err| {
            AppError::Generation(format!("model output did not match the quiz schema: {err}"))
        })
    }

    async fn generate_from_trivia(
        &self,
        topic: &str,
        difficulty: Difficulty,
        count: i16,
    ) -> AppResult<Quiz> {
        let mut query: Vec<(&str, String)> = vec![
            ("amount", count.to_string()),
            ("difficulty", difficulty.trivia_level().to_string()),
            ("type", "multiple".to_string()),
        ];
        if let Some(category) = self.trivia_category {
            query.push(("category", category.to_string()));
        }

        let body: TriviaResponse = self
            .http
            .get(&self.trivia_api_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.response_code != 0 {
            return Err(AppError::UpstreamFetch(format!(
                "trivia source replied with response code {}",
                body.response_code
            )));
        }
        if body.results.is_empty() {
            return Err(AppError::UpstreamFetch(
                "trivia source returned no questions".to_string(),
            ));
        }

        let questions: Vec<Question> = body.results.into_iter().map(map_trivia_record).collect();

        Ok(Quiz::new(
            &format!("Quiz {topic}"),
            &format!("Questions d'entrainement sur {topic}"),
            topic,
            difficulty,
            AccessTier::Free,
            None,
            questions,
        ))
    }
}

/// Reshape a flat trivia record into the canonical question shape: all
/// answers pooled into one option list, uniformly shuffled, with the single
/// original correct answer retained and a generic explanation synthesized.
fn map_trivia_record(record: TriviaRecord) -> Question {
    let correct = decode_html_entities(&record.correct_answer);

    let mut options: Vec<String> = record
        .incorrect_answers
        .iter()
        .map(|answer| decode_html_entities(answer))
        .collect();
    options.push(correct.clone());
    options.shuffle(&mut rand::thread_rng());

    let explanation = format!("La bonne reponse est : {correct}.");

    normalize_question(Question {
        text: decode_html_entities(&record.question),
        options,
        correct_answers: vec![correct],
        explanation: Some(explanation),
    })
}

fn strip_code_fences(content: &str) -> &str {
    CODE_FENCE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str())
        .unwrap_or_else(|| content.trim())
}

/// The trivia bank serves HTML-encoded text. Named entities first, `&amp;`
/// last so already-decoded ampersands are not expanded twice.
fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
