//! Client for the game's own HTTP API
//!
//! Lets a terminal client share one server-side API key instead of each
//! player holding their own.

use super::{OracleError, WordSource, WordValidator, check_candidate, check_length, parse_generated};
use crate::core::Word;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct GenerateReply {
    word: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidateReply {
    #[serde(default)]
    valid: bool,
    error: Option<String>,
}

/// Oracle that forwards to `POST /api/generate-word` and `POST /api/validate-word`
#[derive(Debug, Clone)]
pub struct RemoteOracle {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteOracle {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::UpstreamUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, OracleError> {
        self.client
            .post(format!("{}{path}", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, path, "word service request failed");
                OracleError::UpstreamUnavailable(e.to_string())
            })
    }
}

#[async_trait]
impl WordSource for RemoteOracle {
    async fn generate_word(&self, length: usize) -> Result<Word, OracleError> {
        check_length(length)?;

        let response = self
            .post("/api/generate-word", json!({ "length": length }))
            .await?;
        let status = response.status();
        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        match (status, reply.word) {
            (StatusCode::BAD_REQUEST, _) => Err(OracleError::InvalidLength(length)),
            (s, Some(word)) if s.is_success() => parse_generated(&word, length),
            (s, _) => Err(OracleError::UpstreamUnavailable(
                reply.error.unwrap_or_else(|| format!("server returned {s}")),
            )),
        }
    }
}

#[async_trait]
impl WordValidator for RemoteOracle {
    async fn is_valid_word(&self, word: &str) -> Result<bool, OracleError> {
        check_candidate(word)?;

        let response = self
            .post("/api/validate-word", json!({ "word": word }))
            .await?;
        let status = response.status();
        let reply: ValidateReply = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        if status.is_success() {
            Ok(reply.valid)
        } else if status == StatusCode::BAD_REQUEST {
            Err(OracleError::InvalidLength(word.chars().count()))
        } else {
            Err(OracleError::UpstreamUnavailable(
                reply.error.unwrap_or_else(|| format!("server returned {status}")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let oracle = RemoteOracle::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(oracle.base_url, "http://localhost:3000");
    }

    #[test]
    fn replies_tolerate_missing_fields() {
        let reply: GenerateReply = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(reply.word.is_none());
        assert_eq!(reply.error.as_deref(), Some("boom"));

        let reply: ValidateReply = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(!reply.valid);
    }

    #[tokio::test]
    async fn short_words_never_leave_the_process() {
        let oracle = RemoteOracle::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert_eq!(
            oracle.is_valid_word("xy").await,
            Err(OracleError::InvalidLength(2))
        );
        assert_eq!(
            oracle.generate_word(11).await,
            Err(OracleError::InvalidLength(11))
        );
    }
}
