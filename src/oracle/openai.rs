//! Chat-completion backed oracle
//!
//! Asks a language model for Spanish words and for yes/no dictionary
//! verdicts.

use super::{
    OracleError, WordSource, WordValidator, check_candidate, check_length, normalize_word,
    parse_generated,
};
use crate::core::Word;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const GENERATE_SYSTEM_PROMPT: &str = "Eres un generador de palabras en español.";
const VALIDATE_SYSTEM_PROMPT: &str =
    "Eres un experto en el Diccionario de la lengua española de la RAE.";

const GENERATE_TEMPERATURE: f32 = 0.7;
const GENERATE_MAX_TOKENS: u32 = 10;
const VALIDATE_MAX_TOKENS: u32 = 3;

/// Connection settings for the chat-completion API
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL up to and including the version segment, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// Oracle backed by an OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiOracle {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::UpstreamUnavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat completion request failed");
                OracleError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "chat completion returned error status");
            return Err(OracleError::UpstreamUnavailable(format!(
                "provider returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        first_choice(parsed)
    }
}

fn first_choice(response: ChatResponse) -> Result<String, OracleError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| OracleError::MalformedResponse("no choices in completion".to_string()))
}

fn generate_prompt(length: usize) -> String {
    format!(
        "Genera una palabra en español con exactamente {length} letras, sin caracteres especiales ni acentos."
    )
}

fn validate_prompt(word: &str) -> String {
    format!(
        "¿La palabra \"{word}\" está en el diccionario de la RAE? Responde únicamente \"si\" o \"no\"."
    )
}

/// Interpret a yes/no answer
fn parse_verdict(raw: &str) -> Result<bool, OracleError> {
    let answer = normalize_word(raw);
    if answer.starts_with("si") || answer.starts_with("yes") {
        Ok(true)
    } else if answer.starts_with("no") {
        Ok(false)
    } else {
        Err(OracleError::MalformedResponse(format!(
            "expected si/no, got {raw:?}"
        )))
    }
}

#[async_trait]
impl WordSource for OpenAiOracle {
    async fn generate_word(&self, length: usize) -> Result<Word, OracleError> {
        check_length(length)?;

        let raw = self
            .complete(
                GENERATE_SYSTEM_PROMPT,
                &generate_prompt(length),
                GENERATE_MAX_TOKENS,
                GENERATE_TEMPERATURE,
            )
            .await?;
        debug!(length, raw = %raw.trim(), "generated word");

        parse_generated(&raw, length)
    }
}

#[async_trait]
impl WordValidator for OpenAiOracle {
    async fn is_valid_word(&self, word: &str) -> Result<bool, OracleError> {
        check_candidate(word)?;
        let word = word.trim().to_lowercase();

        let raw = self
            .complete(
                VALIDATE_SYSTEM_PROMPT,
                &validate_prompt(&word),
                VALIDATE_MAX_TOKENS,
                0.0,
            )
            .await?;
        debug!(%word, raw = %raw.trim(), "validation verdict");

        parse_verdict(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_parsing() {
        assert_eq!(parse_verdict("Sí."), Ok(true));
        assert_eq!(parse_verdict("si"), Ok(true));
        assert_eq!(parse_verdict(" No"), Ok(false));
        assert!(matches!(
            parse_verdict("quizás"),
            Err(OracleError::MalformedResponse(_))
        ));
    }

    #[test]
    fn completion_body_shape() {
        let body = ChatRequest {
            model: "gpt-4",
            messages: [
                ChatMessage {
                    role: "system",
                    content: GENERATE_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "hola",
                },
            ],
            max_tokens: GENERATE_MAX_TOKENS,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn first_choice_extracts_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":" Perro\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(parsed).unwrap(), " Perro\n");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_choice(empty).is_err());
    }

    #[test]
    fn prompts_mention_the_request() {
        assert!(generate_prompt(7).contains("exactamente 7 letras"));
        assert!(validate_prompt("perro").contains("\"perro\""));
    }

    #[tokio::test]
    async fn invalid_length_is_rejected_before_any_request() {
        let mut config = OpenAiConfig::new("unused");
        // Unroutable; would fail if a request were attempted
        config.base_url = "http://127.0.0.1:9".to_string();
        let oracle = OpenAiOracle::new(config).unwrap();

        assert_eq!(
            oracle.generate_word(2).await,
            Err(OracleError::InvalidLength(2))
        );
        assert_eq!(
            oracle.generate_word(11).await,
            Err(OracleError::InvalidLength(11))
        );
        assert_eq!(
            oracle.is_valid_word("xy").await,
            Err(OracleError::InvalidLength(2))
        );
    }
}
