//! Store trait definitions.

use async_trait::async_trait;

use crate::error::Result;
use crate::quiz::{NewQuiz, QuizRecord};

/// Capability trait for quiz persistence backends.
///
/// Implementations must keep ids unique within the collection and assign
/// them on insert. A backend using optimistic concurrency surfaces a stale
/// version token as [`StoreError::Conflict`]; callers respond by
/// refetching, never by guessing.
///
/// [`StoreError::Conflict`]: crate::error::StoreError::Conflict
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Fetch all quiz records.
    async fn list(&self) -> Result<Vec<QuizRecord>>;

    /// Insert a new record and return it with its assigned id.
    async fn create(&self, quiz: NewQuiz) -> Result<QuizRecord>;

    /// Replace the record with the same id, returning the stored version.
    async fn update(&self, quiz: QuizRecord) -> Result<QuizRecord>;

    /// Delete a record by id. Returns false when no such record exists.
    async fn delete(&self, id: &str) -> Result<bool>;
}
