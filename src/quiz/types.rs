//! Quiz record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A quiz entry as managed by the dashboard.
///
/// `publish_date` carries wall-clock date semantics: it is a calendar day,
/// not an instant, and never shifts with timezones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    /// Opaque unique identifier, assigned by the store on insert.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Free-text category label.
    pub theme: String,
    /// Publication date.
    pub publish_date: NaiveDate,
    /// Non-negative score.
    pub score: u32,
}

/// A quiz record before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub title: String,
    pub theme: String,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub score: u32,
}

impl NewQuiz {
    /// Create a new quiz.
    pub fn new(title: impl Into<String>, theme: impl Into<String>, publish_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            theme: theme.into(),
            publish_date,
            score: 0,
        }
    }

    /// Set the score.
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// Reject records that must never reach a store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        Ok(())
    }

    /// Attach the id assigned by a store.
    pub fn into_record(self, id: impl Into<String>) -> QuizRecord {
        QuizRecord {
            id: id.into(),
            title: self.title,
            theme: self.theme,
            publish_date: self.publish_date,
            score: self.score,
        }
    }
}

/// Partial update applied to an existing quiz record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl QuizUpdate {
    /// Apply this update to a record.
    pub fn apply_to(&self, record: &mut QuizRecord) {
        if let Some(ref title) = self.title {
            record.title = title.clone();
        }
        if let Some(ref theme) = self.theme {
            record.theme = theme.clone();
        }
        if let Some(publish_date) = self.publish_date {
            record.publish_date = publish_date;
        }
        if let Some(score) = self.score {
            record.score = score;
        }
    }

    /// Reject updates that would leave the record invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title"));
            }
        }
        Ok(())
    }
}
