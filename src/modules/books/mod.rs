//! JSON gateways over the book collection. Each one is deployed as its own
//! service and dials the store independently.

pub mod delete;
pub mod models;
pub mod read;
pub mod write;

use std::sync::Arc;

use bookshelf_db::BookStore;

/// Handler state: the process-wide store handle.
#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<dyn BookStore>,
}

impl BooksState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

/// OpenAPI schemas shared by the book gateways.
pub(crate) fn schemas() -> serde_json::Value {
    serde_json::json!({
        "Book": {
            "type": "object",
            "properties": {
                "id": { "type": "string", "description": "Business identifier, supplied by the caller" },
                "title": { "type": "string", "description": "Title of the book" },
                "author": { "type": "string", "description": "Author of the book" },
                "pages": { "type": "string", "description": "Page count" },
                "edition": { "type": "string", "description": "Edition or ISBN" },
                "year": { "type": "string", "description": "Publication year" }
            },
            "required": ["id", "title", "author", "pages", "edition", "year"]
        },
        "Receipt": {
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "id": { "type": "string" }
            },
            "required": ["message", "id"]
        }
    })
}

/// OpenAPI response object pointing at the shared error schema.
pub(crate) fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use bookshelf_db::Book;
    use tower::ServiceExt;

    pub fn book(id: &str, author: &str, year: &str) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Title of {id}"),
            author: author.to_string(),
            pages: "100".to_string(),
            edition: "1st".to_string(),
            year: year.to_string(),
        }
    }

    /// Send a request and return status plus raw body.
    pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }
}
