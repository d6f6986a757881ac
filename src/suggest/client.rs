//! Generative language API client (Gemini-compatible).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::analytics::{top_quizzes, QuizStats};
use crate::calendar::UpcomingEvent;
use crate::config::SuggestionConfig;
use crate::error::{Result, SuggestionError};
use crate::quiz::QuizRecord;

use super::prompt::{optimal_date_prompt, quiz_ideas_prompt};

/// Fixed user-facing text shown when the suggestion service fails.
pub const SUGGESTION_FALLBACK: &str =
    "No suggestion is available right now. Please try again later.";

/// Client for a Gemini-style `generateContent` endpoint.
pub struct SuggestionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl SuggestionClient {
    /// Create a client from configuration.
    pub fn from_config(config: &SuggestionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or(SuggestionError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SuggestionError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Request a completion for an arbitrary prompt.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SuggestionError::Request("Request timed out".to_string())
                } else if e.is_connect() {
                    SuggestionError::Request(format!("Connection failed: {}", e))
                } else {
                    SuggestionError::Request(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SuggestionError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SuggestionError::Request(format!("Failed to parse response: {}", e)))?;

        let text: String = result
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(SuggestionError::EmptyCompletion.into());
        }
        Ok(text)
    }

    /// Suggest new quiz ideas from past performance and upcoming events.
    pub async fn quiz_ideas(
        &self,
        quizzes: &[QuizRecord],
        upcoming: &[UpcomingEvent],
    ) -> Result<String> {
        let stats = QuizStats::compute(quizzes);
        let top = top_quizzes(quizzes, 5);
        self.complete(&quiz_ideas_prompt(&stats, &top, upcoming)).await
    }

    /// Suggest the best publication date for a quiz title.
    pub async fn optimal_date(&self, title: &str, upcoming: &[UpcomingEvent]) -> Result<String> {
        self.complete(&optimal_date_prompt(title, upcoming)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_missing_api_key() {
        std::env::remove_var("GEMINI_API_KEY");
        let config = SuggestionConfig::default();
        assert!(SuggestionClient::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_with_api_key() {
        let config = SuggestionConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let client = SuggestionClient::from_config(&config).unwrap();
        assert!(!client.base_url.ends_with('/'));
        assert_eq!(client.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_response_parsing() {
        let json = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "## Ideas\n"}, {"text": "1. ..."}]}}
            ]
        }"###;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let text: String = response
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect();
        assert_eq!(text, "## Ideas\n1. ...");
    }

    // Run with: GEMINI_API_KEY=xxx cargo test test_complete_integration -- --ignored
    #[tokio::test]
    #[ignore = "requires API key"]
    async fn test_complete_integration() {
        let client = SuggestionClient::from_config(&SuggestionConfig::default()).unwrap();
        let text = client.complete("Reply with the single word: ok").await.unwrap();
        assert!(!text.is_empty());
    }
}
