//! Delete gateway: `DELETE /api/books/{id}`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};
use bookshelf_db::BookStore;
use bookshelf_http::AppError;
use bookshelf_kernel::{InitCtx, Module};

use super::models::Receipt;
use super::{error_response, schemas, BooksState};

pub struct DeleteModule {
    state: BooksState,
}

impl DeleteModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: BooksState::new(store),
        }
    }
}

#[async_trait]
impl Module for DeleteModule {
    fn name(&self) -> &'static str {
        "books-delete"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books delete gateway initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/api/books/{id}", delete(delete_book))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/api/books/{id}": {
                    "delete": {
                        "summary": "Delete a book by id",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Book deleted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Receipt" }
                                    }
                                }
                            },
                            "404": error_response("No book with this id"),
                            "500": error_response("Internal server error")
                        }
                    }
                }
            },
            "components": { "schemas": schemas() }
        }))
    }
}

async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>, AppError> {
    let deleted = state.store.delete(&id).await.map_err(|err| {
        tracing::error!(book_id = %id, error = %err, "DELETE /api/books/{{id}}: delete failed");
        AppError::internal(err)
    })?;

    if deleted == 0 {
        return Err(AppError::not_found("book not found"));
    }

    tracing::info!(book_id = %id, "book deleted");
    Ok(Json(Receipt::deleted(id)))
}

/// Create a new instance of the delete module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(DeleteModule::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::testing::{book, json, send};
    use axum::{body::Body, http::Request, http::StatusCode};
    use bookshelf_db::MemoryBookStore;

    fn delete_request(id: &str) -> Request<Body> {
        Request::delete(format!("/api/books/{id}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn deletes_existing_book() {
        let store = Arc::new(MemoryBookStore::with_books([book("b1", "A", "2020")]));
        let router = DeleteModule::new(store.clone()).routes();

        let (status, body) = send(router, delete_request("b1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::json!({ "message": "book deleted", "id": "b1" }));
        assert!(store.find("b1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_404_without_mutation() {
        let store = Arc::new(MemoryBookStore::with_books([book("b1", "A", "2020")]));
        let router = DeleteModule::new(store.clone()).routes();

        let (status, body) = send(router, delete_request("does-not-exist")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body), serde_json::json!({ "error": "book not found" }));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let router = DeleteModule::new(Arc::new(MemoryBookStore::unavailable())).routes();

        let (status, _) = send(router, delete_request("b1")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
