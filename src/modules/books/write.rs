//! Write gateway: `POST /api/books`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bookshelf_db::{BookStore, StoreError};
use bookshelf_http::AppError;
use bookshelf_kernel::{InitCtx, Module};

use super::models::{Book, Receipt};
use super::{error_response, schemas, BooksState};

const INVALID_BODY: &str = "invalid request body";

pub struct WriteModule {
    state: BooksState,
}

impl WriteModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: BooksState::new(store),
        }
    }
}

#[async_trait]
impl Module for WriteModule {
    fn name(&self) -> &'static str {
        "books-write"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books write gateway initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/api/books", post(create_book))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/api/books": {
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Receipt" }
                                    }
                                }
                            },
                            "400": error_response("Malformed body"),
                            "409": error_response("A book with this id already exists"),
                            "500": error_response("Internal server error")
                        }
                    }
                }
            },
            "components": { "schemas": schemas() }
        }))
    }
}

fn duplicate(id: &str) -> AppError {
    AppError::conflict(format!("duplicate entry for ID: {id}"))
}

/// Create a book whose `id` is not yet taken.
///
/// The count check gives the common case its 409; the store's unique index
/// catches two creates racing past the check.
async fn create_book(
    State(state): State<BooksState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Receipt>), AppError> {
    let Json(book) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "POST /api/books: rejected body");
        AppError::bad_request(INVALID_BODY)
    })?;

    if book.id.trim().is_empty() {
        return Err(AppError::bad_request(INVALID_BODY));
    }

    let existing = state.store.count(&book.id).await.map_err(|err| {
        tracing::error!(book_id = %book.id, error = %err, "POST /api/books: duplicate check failed");
        AppError::internal(err)
    })?;
    if existing > 0 {
        return Err(duplicate(&book.id));
    }

    match state.store.insert(&book).await {
        Ok(()) => {
            tracing::info!(book_id = %book.id, "book created");
            Ok((StatusCode::CREATED, Json(Receipt::created(book.id))))
        }
        Err(StoreError::Duplicate(id)) => Err(duplicate(&id)),
        Err(err) => {
            tracing::error!(book_id = %book.id, error = %err, "POST /api/books: insert failed");
            Err(AppError::internal(err))
        }
    }
}

/// Create a new instance of the write module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(WriteModule::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::testing::{book, json, send};
    use axum::{body::Body, http::header::CONTENT_TYPE, http::Request};
    use bookshelf_db::{MemoryBookStore, StoreResult};

    fn post(body: &str) -> Request<Body> {
        Request::post("/api/books")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const B1: &str =
        r#"{"id":"b1","title":"T","author":"A","pages":"10","edition":"E1","year":"2020"}"#;

    #[tokio::test]
    async fn creates_and_echoes_id() {
        let store = Arc::new(MemoryBookStore::new());
        let router = WriteModule::new(store.clone()).routes();

        let (status, body) = send(router, post(B1)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json(&body), serde_json::json!({ "message": "book created", "id": "b1" }));
        assert_eq!(store.find("b1").await.unwrap().unwrap().title, "T");
    }

    #[tokio::test]
    async fn existing_id_is_a_conflict_and_leaves_record() {
        let original = book("b1", "Original", "1999");
        let store = Arc::new(MemoryBookStore::with_books([original.clone()]));
        let router = WriteModule::new(store.clone()).routes();

        let (status, body) = send(router, post(B1)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json(&body), serde_json::json!({ "error": "duplicate entry for ID: b1" }));
        assert_eq!(store.find("b1").await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let bodies = [
            "not json",
            r#"{"id":"b1","title":"T"}"#,
            r#"{"id":"","title":"T","author":"A","pages":"1","edition":"E","year":"1"}"#,
            r#"{"id":7,"title":"T","author":"A","pages":"1","edition":"E","year":"1"}"#,
        ];

        for body in bodies {
            let store = Arc::new(MemoryBookStore::new());
            let router = WriteModule::new(store.clone()).routes();

            let (status, response) = send(router, post(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json(&response), serde_json::json!({ "error": "invalid request body" }));
            assert!(store.list().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let router = WriteModule::new(Arc::new(MemoryBookStore::new())).routes();
        let request = Request::post("/api/books").body(Body::from(B1)).unwrap();

        let (status, _) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let router = WriteModule::new(Arc::new(MemoryBookStore::unavailable())).routes();

        let (status, body) = send(router, post(B1)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body), serde_json::json!({ "error": "internal server error" }));
    }

    /// Reports the id as free, then loses the race at insert time.
    struct RacingStore;

    #[async_trait]
    impl BookStore for RacingStore {
        async fn list(&self) -> StoreResult<Vec<Book>> {
            Ok(Vec::new())
        }

        async fn find(&self, _id: &str) -> StoreResult<Option<Book>> {
            Ok(None)
        }

        async fn count(&self, _id: &str) -> StoreResult<u64> {
            Ok(0)
        }

        async fn insert(&self, book: &Book) -> StoreResult<()> {
            Err(StoreError::Duplicate(book.id.clone()))
        }

        async fn delete(&self, _id: &str) -> StoreResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn unique_index_violation_maps_to_conflict() {
        let router = WriteModule::new(Arc::new(RacingStore)).routes();

        let (status, body) = send(router, post(B1)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json(&body), serde_json::json!({ "error": "duplicate entry for ID: b1" }));
    }
}
