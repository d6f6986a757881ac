//! Quiz collection management.
//!
//! `QuizManager` is the single owner of the in-memory quiz snapshot. All
//! mutations go through the injected [`QuizStore`]; the snapshot mirrors
//! the store and is resynchronized by refetching whenever a write conflict
//! reveals that another writer got there first.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{QuizboardError, Result, StoreError};
use crate::store::QuizStore;

use super::types::{NewQuiz, QuizRecord, QuizUpdate};

/// CRUD façade over a quiz store with a cached authoritative snapshot.
pub struct QuizManager {
    store: Arc<dyn QuizStore>,
    quizzes: RwLock<Vec<QuizRecord>>,
}

impl QuizManager {
    /// Create a manager with an empty snapshot. Call [`refresh`] to
    /// populate it.
    ///
    /// [`refresh`]: QuizManager::refresh
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self {
            store,
            quizzes: RwLock::new(Vec::new()),
        }
    }

    /// Refetch the authoritative list from the store and replace the
    /// snapshot, newest publish date first.
    pub async fn refresh(&self) -> Result<Vec<QuizRecord>> {
        let mut list = self.store.list().await?;
        sort_newest_first(&mut list);
        let mut quizzes = self.quizzes.write().await;
        *quizzes = list.clone();
        debug!(count = list.len(), "refreshed quiz snapshot");
        Ok(list)
    }

    /// The current snapshot.
    pub async fn list(&self) -> Vec<QuizRecord> {
        self.quizzes.read().await.clone()
    }

    /// Look up one record in the snapshot.
    pub async fn get(&self, id: &str) -> Option<QuizRecord> {
        self.quizzes.read().await.iter().find(|q| q.id == id).cloned()
    }

    /// Validate and insert a new quiz.
    pub async fn create(&self, new: NewQuiz) -> Result<QuizRecord> {
        new.validate()?;

        match self.store.create(new).await {
            Ok(record) => {
                let mut quizzes = self.quizzes.write().await;
                quizzes.push(record.clone());
                sort_newest_first(&mut quizzes);
                Ok(record)
            }
            Err(err) => Err(self.resync_on_conflict(err).await),
        }
    }

    /// Apply a partial update to an existing quiz.
    pub async fn update(&self, id: &str, update: QuizUpdate) -> Result<Option<QuizRecord>> {
        update.validate()?;

        let Some(mut record) = self.get(id).await else {
            return Ok(None);
        };
        update.apply_to(&mut record);

        match self.store.update(record).await {
            Ok(updated) => {
                let mut quizzes = self.quizzes.write().await;
                if let Some(slot) = quizzes.iter_mut().find(|q| q.id == updated.id) {
                    *slot = updated.clone();
                }
                sort_newest_first(&mut quizzes);
                Ok(Some(updated))
            }
            Err(err) => Err(self.resync_on_conflict(err).await),
        }
    }

    /// Delete a quiz by id. Returns false when no such record exists.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        match self.store.delete(id).await {
            Ok(deleted) => {
                if deleted {
                    self.quizzes.write().await.retain(|q| q.id != id);
                }
                Ok(deleted)
            }
            Err(err) => Err(self.resync_on_conflict(err).await),
        }
    }

    /// On a write conflict the snapshot may be behind the authoritative
    /// store: refetch before surfacing the error so the caller sees a
    /// consistent list when it retries.
    async fn resync_on_conflict(&self, err: QuizboardError) -> QuizboardError {
        if matches!(err, QuizboardError::Store(StoreError::Conflict)) {
            warn!("write conflict, refetching authoritative quiz list");
            if let Err(refresh_err) = self.refresh().await {
                warn!(error = %refresh_err, "resync after conflict failed");
            }
        }
        err
    }
}

fn sort_newest_first(quizzes: &mut [QuizRecord]) {
    quizzes.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let manager = QuizManager::new(Arc::new(MemoryStore::new()));

        manager
            .create(NewQuiz::new("Ancien", "Histoire", date(2023, 5, 8)))
            .await
            .unwrap();
        manager
            .create(NewQuiz::new("Récent", "Sciences", date(2023, 10, 5)))
            .await
            .unwrap();

        let list = manager.list().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "Récent");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let manager = QuizManager::new(Arc::new(MemoryStore::new()));
        let result = manager.create(NewQuiz::new("", "Histoire", date(2023, 5, 8))).await;
        assert!(matches!(result, Err(QuizboardError::Validation(_))));
        assert!(manager.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let manager = QuizManager::new(Arc::new(MemoryStore::new()));
        let updated = manager.update("nope", QuizUpdate::default()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let manager = QuizManager::new(Arc::new(MemoryStore::new()));
        let keep = manager
            .create(NewQuiz::new("Garder", "Histoire", date(2023, 5, 8)))
            .await
            .unwrap();
        let drop = manager
            .create(NewQuiz::new("Supprimer", "Histoire", date(2023, 6, 8)))
            .await
            .unwrap();

        assert!(manager.delete(&drop.id).await.unwrap());
        let list = manager.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, keep.id);

        assert!(!manager.delete(&drop.id).await.unwrap());
    }
}
