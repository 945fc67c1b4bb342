//! Read gateway: `GET /api/books` and `GET /api/books/{id}`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use bookshelf_db::{seed_defaults, BookStore};
use bookshelf_http::AppError;
use bookshelf_kernel::{InitCtx, Module};

use super::models::Book;
use super::{error_response, schemas, BooksState};

pub struct ReadModule {
    state: BooksState,
}

impl ReadModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: BooksState::new(store),
        }
    }
}

#[async_trait]
impl Module for ReadModule {
    fn name(&self) -> &'static str {
        "books-read"
    }

    /// Seeds the default records; per-record failures are logged, not fatal.
    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let report = seed_defaults(self.state.store.as_ref()).await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            inserted = report.inserted,
            existing = report.existing,
            failed = report.failed,
            "default books seeded"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/api/books", get(list_books))
            .route("/api/books/{id}", get(get_book))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/api/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book, in store order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/api/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": { "description": "No book with this id" },
                            "500": error_response("Internal server error")
                        }
                    }
                }
            },
            "components": { "schemas": schemas() }
        }))
    }
}

/// List every book. An empty collection is an empty array.
async fn list_books(State(state): State<BooksState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.store.list().await.map_err(|err| {
        tracing::error!(error = %err, "GET /api/books: listing books failed");
        AppError::internal(err)
    })?;
    Ok(Json(books))
}

/// Fetch one book; a missing id answers 404 with no body.
async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    match state.store.find(&id).await {
        Ok(Some(book)) => Ok(Json(book)),
        Ok(None) => Err(AppError::not_found_empty()),
        Err(err) => {
            tracing::error!(book_id = %id, error = %err, "GET /api/books/{{id}}: lookup failed");
            Err(AppError::internal(err))
        }
    }
}

/// Create a new instance of the read module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(ReadModule::new(store))
}
