use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::model::Book;
use crate::store::BookStore;

/// In-process store with the same uniqueness rule as the Mongo collection.
///
/// Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
    unavailable: bool,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().collect()),
            unavailable: false,
        }
    }

    /// A store whose every operation fails, as if the backend were down.
    pub fn unavailable() -> Self {
        Self {
            books: RwLock::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> StoreResult<Vec<Book>> {
        self.check()?;
        Ok(self.books.read().await.clone())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Book>> {
        self.check()?;
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn count(&self, id: &str) -> StoreResult<u64> {
        self.check()?;
        let books = self.books.read().await;
        Ok(books.iter().filter(|b| b.id == id).count() as u64)
    }

    async fn insert(&self, book: &Book) -> StoreResult<()> {
        self.check()?;
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return Err(StoreError::Duplicate(book.id.clone()));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        self.check()?;
        let mut books = self.books.write().await;
        match books.iter().position(|b| b.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: format!("title {id}"),
            author: "author".to_string(),
            pages: "1".to_string(),
            edition: "1st".to_string(),
            year: "2000".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_existing_id() {
        let store = MemoryBookStore::new();
        store.insert(&book("a")).await.unwrap();

        let err = store.insert(&book("a")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.count("a").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryBookStore::with_books([book("c"), book("a")]);
        store.insert(&book("b")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn delete_reports_removed_count() {
        let store = MemoryBookStore::with_books([book("a")]);
        assert_eq!(store.delete("missing").await.unwrap(), 0);
        assert_eq!(store.delete("a").await.unwrap(), 1);
        assert!(store.find("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryBookStore::unavailable();
        assert!(store.list().await.is_err());
        assert!(store.find("a").await.is_err());
        assert!(store.insert(&book("a")).await.is_err());
        assert!(store.delete("a").await.is_err());
    }
}
