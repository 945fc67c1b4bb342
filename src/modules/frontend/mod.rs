//! Presentation gateway: server-rendered HTML over the same book list the
//! read gateway serves, fetched through this service's own store handle.

pub mod views;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use bookshelf_db::{Book, BookStore, StoreError};
use bookshelf_kernel::{InitCtx, Module};
use serde::Deserialize;

#[derive(Clone)]
struct FrontendState {
    store: Arc<dyn BookStore>,
}

pub struct FrontendModule {
    state: FrontendState,
}

impl FrontendModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: FrontendState { store },
        }
    }
}

#[async_trait]
impl Module for FrontendModule {
    fn name(&self) -> &'static str {
        "frontend"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "frontend initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/books", get(books))
            .route("/authors", get(authors))
            .route("/years", get(years))
            .route("/search", get(search))
            .with_state(self.state.clone())
    }
}

/// Store failure rendered as the HTML error view.
struct PageError {
    message: &'static str,
    source: StoreError,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.source, "{}", self.message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::error(self.message)),
        )
            .into_response()
    }
}

async fn load_books(state: &FrontendState, message: &'static str) -> Result<Vec<Book>, PageError> {
    state
        .store
        .list()
        .await
        .map_err(|source| PageError { message, source })
}

/// Distinct non-empty authors.
pub fn author_set(books: &[Book]) -> BTreeSet<String> {
    books
        .iter()
        .filter(|book| !book.author.is_empty())
        .map(|book| book.author.clone())
        .collect()
}

/// Distinct years; an empty year is kept as a value of its own.
pub fn year_set(books: &[Book]) -> BTreeSet<String> {
    books.iter().map(|book| book.year.clone()).collect()
}

/// Books whose title, author or year contains `query`, ignoring case.
pub fn matching(books: Vec<Book>, query: &str) -> Vec<Book> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return books;
    }
    books
        .into_iter()
        .filter(|book| {
            [&book.title, &book.author, &book.year]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct BooksQuery {
    q: Option<String>,
}

async fn index() -> Html<String> {
    Html(views::index())
}

async fn books(
    State(state): State<FrontendState>,
    Query(query): Query<BooksQuery>,
) -> Result<Html<String>, PageError> {
    let books = load_books(&state, "Failed to load books").await?;
    let books = match query.q.as_deref() {
        Some(q) => matching(books, q),
        None => books,
    };
    Ok(Html(views::book_table(&books)))
}

async fn authors(State(state): State<FrontendState>) -> Result<Html<String>, PageError> {
    let books = load_books(&state, "Failed to load authors").await?;
    Ok(Html(views::author_list(&author_set(&books))))
}

async fn years(State(state): State<FrontendState>) -> Result<Html<String>, PageError> {
    let books = load_books(&state, "Failed to load years").await?;
    Ok(Html(views::year_list(&year_set(&books))))
}

async fn search() -> Html<String> {
    Html(views::search())
}

/// Create a new instance of the frontend module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(FrontendModule::new(store))
}
