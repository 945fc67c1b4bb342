use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::Book;

/// The document-store operations the gateways are built on.
///
/// Implementations are shared across concurrent requests behind an `Arc`,
/// so every method takes `&self`.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Every record, in whatever order the store yields them.
    async fn list(&self) -> StoreResult<Vec<Book>>;

    /// The record with this business key, if any.
    async fn find(&self, id: &str) -> StoreResult<Option<Book>>;

    /// Number of records carrying this business key.
    async fn count(&self, id: &str) -> StoreResult<u64>;

    /// Insert a record. Returns [`crate::StoreError::Duplicate`] when the
    /// store itself rejects the business key.
    async fn insert(&self, book: &Book) -> StoreResult<()>;

    /// Delete the record with this business key, returning how many went.
    async fn delete(&self, id: &str) -> StoreResult<u64>;
}
