use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub trivia_api_url: String,
    pub trivia_category: Option<u32>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "concours-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "sk-dev-placeholder".to_string()),
            ),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            trivia_api_url: env::var("TRIVIA_API_URL")
                .unwrap_or_else(|_| "https://opentdb.com/api.php".to_string()),
            trivia_category: env::var("TRIVIA_CATEGORY")
                .ok()
                .and_then(|c| c.parse().ok()),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret() == "sk-dev-placeholder" {
            panic!(
                "FATAL: OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
            );
        }

        if self.mongo_db_name == "concours-local" {
            panic!("FATAL: MONGO_DB_NAME is using the local default! Set MONGO_DB_NAME environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "concours-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: SecretString::from("sk-test-key".to_string()),
            openai_api_base: None,
            openai_model: "gpt-4o-mini".to_string(),
            trivia_api_url: "https://opentdb.com/api.php".to_string(),
            trivia_category: Some(9),
        }
    }
}
