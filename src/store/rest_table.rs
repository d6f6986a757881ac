//! REST table store backend (PostgREST-style).
//!
//! CRUD against a single named table. Storage column names differ from the
//! record field names; the [`TableRow`] adapter carries the mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::config::RestTableConfig;
use crate::error::{Result, StoreError};
use crate::quiz::{NewQuiz, QuizRecord};

use super::row::TableRow;
use super::traits::QuizStore;

/// Quiz store over a PostgREST-style table service.
pub struct RestTableStore {
    client: Client,
    base_url: String,
    table: String,
    api_key: String,
}

impl RestTableStore {
    /// Create a store from configuration.
    pub fn from_config(config: &RestTableConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("QUIZBOARD_TABLE_API_KEY").ok())
            .ok_or_else(|| {
                StoreError::Connection(
                    "API key not provided and QUIZBOARD_TABLE_API_KEY env var not set".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Vec<TableRow>> {
        let response = self.request(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Connection("Request timed out".to_string())
            } else if e.is_connect() {
                StoreError::Connection(format!("Connection failed: {}", e))
            } else {
                StoreError::Connection(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
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

        let rows: Vec<TableRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(rows)
    }

    /// Convert fetched rows, dropping malformed ones instead of failing the
    /// whole listing.
    fn into_records(rows: Vec<TableRow>) -> Vec<QuizRecord> {
        rows.into_iter()
            .filter_map(|row| match row.into_record() {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "skipping malformed table row");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl QuizStore for RestTableStore {
    async fn list(&self) -> Result<Vec<QuizRecord>> {
        let url = format!("{}?select=*&order=quiz_date.desc", self.table_url());
        let rows = self.send(self.client.get(&url)).await?;
        Ok(Self::into_records(rows))
    }

    async fn create(&self, quiz: NewQuiz) -> Result<QuizRecord> {
        let rows = self
            .send(self.client.post(self.table_url()).json(&[TableRow::from_new(&quiz)]))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Malformed("insert returned no row".to_string()))?
            .into_record()
            .map_err(Into::into)
    }

    async fn update(&self, quiz: QuizRecord) -> Result<QuizRecord> {
        let url = format!("{}?id=eq.{}", self.table_url(), quiz.id);
        let rows = self
            .send(self.client.patch(&url).json(&TableRow::from_record(&quiz)))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(quiz.id.clone()))?
            .into_record()
            .map_err(Into::into)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);
        let rows = self.send(self.client.delete(&url)).await?;
        Ok(!rows.is_empty())
    }
}
