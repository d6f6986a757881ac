//! Versioned JSON document store backend.
//!
//! The whole quiz collection lives as one JSON array in a git repository,
//! accessed through a contents API. Reads return the array plus the blob
//! sha, which acts as the optimistic concurrency token: every write sends
//! the last-seen sha, and a mismatch means another writer committed first.
//! That case surfaces as [`StoreError::Conflict`] so the caller refetches
//! instead of silently clobbering the other writer's changes.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::DocumentConfig;
use crate::error::{Result, StoreError};
use crate::quiz::{NewQuiz, QuizRecord};

use super::row::DocRecord;
use super::traits::QuizStore;

/// Last-seen document content and version token.
#[derive(Debug, Default)]
struct DocState {
    records: Vec<DocRecord>,
    sha: Option<String>,
    loaded: bool,
}

/// Quiz store over a versioned JSON document.
pub struct DocumentStore {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    path: String,
    token: String,
    state: RwLock<DocState>,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

impl DocumentStore {
    /// Create a store from configuration.
    pub fn from_config(config: &DocumentConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .or_else(|| std::env::var("QUIZBOARD_GIT_TOKEN").ok())
            .ok_or_else(|| {
                StoreError::Connection(
                    "Access token not provided and QUIZBOARD_GIT_TOKEN env var not set".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("quizboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            path: config.path.clone(),
            token,
            state: RwLock::new(DocState::default()),
        })
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, self.path
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", self.token))
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn map_send_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Connection("Request timed out".to_string())
        } else if e.is_connect() {
            StoreError::Connection(format!("Connection failed: {}", e))
        } else {
            StoreError::Connection(format!("Request failed: {}", e))
        }
    }

    /// Fetch the document and its version token. A missing document reads
    /// as an empty collection with no token; the first write then creates
    /// the file.
    async fn fetch(&self) -> Result<(Vec<DocRecord>, Option<String>)> {
        let response = self
            .request(self.client.get(self.contents_url()))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(path = %self.path, "document not found, starting empty");
            return Ok((Vec::new(), None));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Backend {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        // The API wraps base64 content across lines.
        let packed: String = contents.content.split_whitespace().collect();
        let bytes = BASE64
            .decode(packed)
            .map_err(|e| StoreError::Malformed(format!("invalid base64 content: {}", e)))?;
        let records: Vec<DocRecord> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Malformed(format!("invalid document JSON: {}", e)))?;

        Ok((records, Some(contents.sha)))
    }

    /// Write the full collection back using the held version token.
    async fn write_back(
        &self,
        records: &[DocRecord],
        sha: Option<String>,
        message: String,
    ) -> Result<String> {
        let json = serde_json::to_vec_pretty(records)?;
        let request = WriteRequest {
            message,
            content: BASE64.encode(json),
            sha,
        };

        let response = self
            .request(self.client.put(self.contents_url()).json(&request))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status == StatusCode::CONFLICT || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(StoreError::Conflict.into());
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Backend {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let written: WriteResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(written.content.sha)
    }

    /// Load the document into the held state if this store has not read it
    /// yet. Writers need the current array and token before mutating.
    async fn ensure_loaded(&self, state: &mut DocState) -> Result<()> {
        if !state.loaded {
            let (records, sha) = self.fetch().await?;
            state.records = records;
            state.sha = sha;
            state.loaded = true;
        }
        Ok(())
    }
}

#[async_trait]
impl QuizStore for DocumentStore {
    async fn list(&self) -> Result<Vec<QuizRecord>> {
        let (records, sha) = self.fetch().await?;

        let mut state = self.state.write().await;
        state.records = records.clone();
        state.sha = sha;
        state.loaded = true;
        drop(state);

        Ok(records
            .into_iter()
            .filter_map(|row| match row.into_record() {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "skipping malformed document entry");
                    None
                }
            })
            .collect())
    }

    async fn create(&self, quiz: NewQuiz) -> Result<QuizRecord> {
        let record = quiz.into_record(uuid::Uuid::new_v4().to_string());

        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state).await?;

        let mut records = state.records.clone();
        records.push(DocRecord::from_record(&record));

        let message = format!("Add quiz: {}", record.title);
        let sha = self.write_back(&records, state.sha.clone(), message).await?;
        state.records = records;
        state.sha = Some(sha);

        Ok(record)
    }

    async fn update(&self, quiz: QuizRecord) -> Result<QuizRecord> {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state).await?;

        let mut records = state.records.clone();
        let slot = records
            .iter_mut()
            .find(|r| r.id == quiz.id)
            .ok_or_else(|| StoreError::NotFound(quiz.id.clone()))?;
        *slot = DocRecord::from_record(&quiz);

        let message = format!("Update quiz: {}", quiz.title);
        let sha = self.write_back(&records, state.sha.clone(), message).await?;
        state.records = records;
        state.sha = Some(sha);

        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        self.ensure_loaded(&mut state).await?;

        let mut records = state.records.clone();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }

        let message = format!("Delete quiz: {}", id);
        let sha = self.write_back(&records, state.sha.clone(), message).await?;
        state.records = records;
        state.sha = Some(sha);

        Ok(true)
    }
}
