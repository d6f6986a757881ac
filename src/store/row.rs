//! Wire row types for the storage backends.
//!
//! Storage names differ from the in-memory field names (`nom` vs `title`,
//! `quiz_date` vs `publish_date`, `votes` vs `score`); this module is the
//! single place where that mapping lives. Dates travel as ISO strings and
//! tolerate a trailing time component left behind by older writers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::quiz::{NewQuiz, QuizRecord};

/// One row of the REST table backend, in storage column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nom: String,
    pub theme: String,
    pub quiz_date: String,
    pub votes: u32,
}

impl TableRow {
    /// Row for an insert; the backend assigns the id.
    pub fn from_new(quiz: &NewQuiz) -> Self {
        Self {
            id: None,
            nom: quiz.title.clone(),
            theme: quiz.theme.clone(),
            quiz_date: format_wire_date(quiz.publish_date),
            votes: quiz.score,
        }
    }

    /// Row for an update of an existing record.
    pub fn from_record(record: &QuizRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            nom: record.title.clone(),
            theme: record.theme.clone(),
            quiz_date: format_wire_date(record.publish_date),
            votes: record.score,
        }
    }

    /// Convert a fetched row back into a record.
    pub fn into_record(self) -> Result<QuizRecord, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Malformed("row without id".to_string()))?;
        Ok(QuizRecord {
            id,
            title: self.nom,
            theme: self.theme,
            publish_date: parse_wire_date(&self.quiz_date)?,
            score: self.votes,
        })
    }
}

/// One element of the versioned JSON document's array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRecord {
    pub id: String,
    pub nom: String,
    pub theme: String,
    pub quiz_date: String,
    pub votes: u32,
}

impl DocRecord {
    pub fn from_record(record: &QuizRecord) -> Self {
        Self {
            id: record.id.clone(),
            nom: record.title.clone(),
            theme: record.theme.clone(),
            quiz_date: format_wire_date(record.publish_date),
            votes: record.score,
        }
    }

    pub fn into_record(self) -> Result<QuizRecord, StoreError> {
        Ok(QuizRecord {
            id: self.id,
            title: self.nom,
            theme: self.theme,
            publish_date: parse_wire_date(&self.quiz_date)?,
            score: self.votes,
        })
    }
}

/// Parse an ISO date, ignoring any trailing `T...` time component.
pub fn parse_wire_date(value: &str) -> Result<NaiveDate, StoreError> {
    let date_part = &value[..value.find('T').unwrap_or(value.len())];
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| StoreError::Malformed(format!("invalid date: {}", value)))
}

fn format_wire_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuizRecord {
        QuizRecord {
            id: "q1".to_string(),
            title: "Le système solaire".to_string(),
            theme: "Sciences".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2023, 10, 5).unwrap(),
            score: 180,
        }
    }

    #[test]
    fn test_table_row_round_trip() {
        let row = TableRow::from_record(&record());
        assert_eq!(row.nom, "Le système solaire");
        assert_eq!(row.quiz_date, "2023-10-05");
        assert_eq!(row.into_record().unwrap(), record());
    }

    #[test]
    fn test_doc_record_uses_camel_case_date_key() {
        let json = serde_json::to_value(DocRecord::from_record(&record())).unwrap();
        assert!(json.get("quizDate").is_some());
        assert!(json.get("quiz_date").is_none());
    }

    #[test]
    fn test_parse_wire_date_tolerates_datetime() {
        let date = parse_wire_date("2023-07-14T00:00:00.000Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 7, 14).unwrap());
    }

    #[test]
    fn test_parse_wire_date_rejects_garbage() {
        assert!(parse_wire_date("14/07/2023").is_err());
        assert!(parse_wire_date("").is_err());
    }

    #[test]
    fn test_row_without_id_is_malformed() {
        let row = TableRow {
            id: None,
            nom: "X".to_string(),
            theme: "Y".to_string(),
            quiz_date: "2023-01-01".to_string(),
            votes: 0,
        };
        assert!(matches!(row.into_record(), Err(StoreError::Malformed(_))));
    }
}
