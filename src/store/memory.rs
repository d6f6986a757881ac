//! In-process store backend.
//!
//! No persistence; useful for tests, demos and offline runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::quiz::{NewQuiz, QuizRecord};

use super::traits::QuizStore;

/// In-memory quiz store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    quizzes: RwLock<Vec<QuizRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with sample quizzes.
    pub fn with_sample_data() -> Self {
        let sample = [
            ("Quiz sur la Révolution Française", "Histoire", (2023, 7, 14), 125),
            ("Les films de Quentin Tarantino", "Cinéma", (2023, 9, 20), 250),
            ("Le système solaire", "Sciences", (2023, 10, 5), 180),
            ("Quiz sur la Seconde Guerre Mondiale", "Histoire", (2023, 5, 8), 95),
        ];

        let quizzes = sample
            .into_iter()
            .filter_map(|(title, theme, (y, m, d), score)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| QuizRecord {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: title.to_string(),
                    theme: theme.to_string(),
                    publish_date: date,
                    score,
                })
            })
            .collect();

        Self {
            quizzes: RwLock::new(quizzes),
        }
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list(&self) -> Result<Vec<QuizRecord>> {
        Ok(self.quizzes.read().await.clone())
    }

    async fn create(&self, quiz: NewQuiz) -> Result<QuizRecord> {
        let record = quiz.into_record(uuid::Uuid::new_v4().to_string());
        self.quizzes.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, quiz: QuizRecord) -> Result<QuizRecord> {
        let mut quizzes = self.quizzes.write().await;
        match quizzes.iter_mut().find(|q| q.id == quiz.id) {
            Some(slot) => {
                *slot = quiz.clone();
                Ok(quiz)
            }
            None => Err(StoreError::NotFound(quiz.id).into()),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut quizzes = self.quizzes.write().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        Ok(quizzes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store
            .create(NewQuiz::new("A", "Histoire", date(2023, 1, 1)))
            .await
            .unwrap();
        let b = store
            .create(NewQuiz::new("B", "Histoire", date(2023, 1, 2)))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let ghost = QuizRecord {
            id: "ghost".to_string(),
            title: "X".to_string(),
            theme: "Y".to_string(),
            publish_date: date(2023, 1, 1),
            score: 0,
        };
        let result = store.update(ghost).await;
        assert!(matches!(
            result,
            Err(crate::error::QuizboardError::Store(StoreError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_sample_data_is_seeded() {
        let store = MemoryStore::with_sample_data();
        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 4);
        assert!(list.iter().any(|q| q.theme == "Sciences"));
    }
}
