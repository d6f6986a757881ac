//! Tests for the quiz manager's conflict handling over the store trait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use quizboard::error::{QuizboardError, Result, StoreError};
use quizboard::quiz::{NewQuiz, QuizManager, QuizRecord, QuizUpdate};
use quizboard::store::{MemoryStore, QuizStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Store wrapper that fails the next write with a version conflict, the way
/// the document backend does when another writer committed first.
struct ConflictingStore {
    inner: MemoryStore,
    fail_next_write: AtomicBool,
}

impl ConflictingStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_next_write: AtomicBool::new(false),
        }
    }

    fn arm(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    fn check_conflict(&self) -> Result<()> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            Err(StoreError::Conflict.into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QuizStore for ConflictingStore {
    async fn list(&self) -> Result<Vec<QuizRecord>> {
        self.inner.list().await
    }

    async fn create(&self, quiz: NewQuiz) -> Result<QuizRecord> {
        self.check_conflict()?;
        self.inner.create(quiz).await
    }

    async fn update(&self, quiz: QuizRecord) -> Result<QuizRecord> {
        self.check_conflict()?;
        self.inner.update(quiz).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.check_conflict()?;
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_conflict_resynchronizes_snapshot() {
    let store = Arc::new(ConflictingStore::new());
    let manager = QuizManager::new(store.clone());

    let mine = manager
        .create(NewQuiz::new("Mon quiz", "Histoire", date(2023, 7, 14)))
        .await
        .unwrap();

    // Another writer adds a record behind the manager's back, and our next
    // write hits the stale version token.
    let theirs = store
        .inner
        .create(NewQuiz::new("Leur quiz", "Sciences", date(2023, 8, 1)))
        .await
        .unwrap();
    store.arm();

    let update = QuizUpdate {
        score: Some(999),
        ..Default::default()
    };
    let result = manager.update(&mine.id, update).await;
    assert!(matches!(
        result,
        Err(QuizboardError::Store(StoreError::Conflict))
    ));

    // The conflict must not corrupt the snapshot: after the automatic
    // resync the manager agrees with the authoritative store.
    let snapshot = manager.list().await;
    let authoritative = store.list().await.unwrap();
    assert_eq!(snapshot.len(), authoritative.len());
    assert!(snapshot.iter().any(|q| q.id == theirs.id));

    // And the failed update really did not land anywhere.
    let stored = snapshot.iter().find(|q| q.id == mine.id).unwrap();
    assert_eq!(stored.score, mine.score);

    // Retrying after the resync succeeds.
    let update = QuizUpdate {
        score: Some(999),
        ..Default::default()
    };
    let retried = manager.update(&mine.id, update).await.unwrap().unwrap();
    assert_eq!(retried.score, 999);
}

#[tokio::test]
async fn test_delete_conflict_keeps_record() {
    let store = Arc::new(ConflictingStore::new());
    let manager = QuizManager::new(store.clone());

    let record = manager
        .create(NewQuiz::new("Quiz", "Histoire", date(2023, 7, 14)))
        .await
        .unwrap();

    store.arm();
    assert!(manager.delete(&record.id).await.is_err());

    let snapshot = manager.list().await;
    assert_eq!(snapshot.len(), 1);

    assert!(manager.delete(&record.id).await.unwrap());
    assert!(manager.list().await.is_empty());
}

#[tokio::test]
async fn test_full_crud_cycle_over_memory_store() {
    let manager = QuizManager::new(Arc::new(MemoryStore::new()));

    let created = manager
        .create(
            NewQuiz::new("Le système solaire", "Sciences", date(2023, 10, 5)).with_score(180),
        )
        .await
        .unwrap();

    let update = QuizUpdate {
        title: Some("Le système solaire (révisé)".to_string()),
        ..Default::default()
    };
    let updated = manager.update(&created.id, update).await.unwrap().unwrap();
    assert_eq!(updated.title, "Le système solaire (révisé)");
    assert_eq!(updated.score, 180);

    let refreshed = manager.refresh().await.unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].title, "Le système solaire (révisé)");

    assert!(manager.delete(&created.id).await.unwrap());
    assert!(manager.refresh().await.unwrap().is_empty());
}
