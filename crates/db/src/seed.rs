//! Idempotent pre-population of the default catalogue entries.

use crate::model::Book;
use crate::store::BookStore;

/// Outcome of one seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
    pub failed: usize,
}

/// The records every fresh catalogue starts with.
pub fn default_books() -> Vec<Book> {
    vec![
        default_book(
            "example1",
            "The Vortex",
            "José Eustasio Rivera",
            "958-30-0804-4",
            "292",
            "1924",
        ),
        default_book(
            "example2",
            "Frankenstein",
            "Mary Shelley",
            "978-3-649-64609-9",
            "280",
            "1818",
        ),
        default_book(
            "example3",
            "The Black Cat",
            "Edgar Allan Poe",
            "978-3-99168-238-7",
            "280",
            "1843",
        ),
    ]
}

fn default_book(id: &str, title: &str, author: &str, edition: &str, pages: &str, year: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        pages: pages.to_string(),
        edition: edition.to_string(),
        year: year.to_string(),
    }
}

/// Insert [`default_books`] that are not already present.
pub async fn seed_defaults(store: &dyn BookStore) -> SeedReport {
    seed(store, &default_books()).await
}

/// Insert each record whose id is absent. A failure on one record is logged
/// and does not stop the rest.
pub async fn seed(store: &dyn BookStore, books: &[Book]) -> SeedReport {
    let mut report = SeedReport::default();

    for book in books {
        let count = match store.count(&book.id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(book_id = %book.id, error = %err, "failed to check for existing book");
                report.failed += 1;
                continue;
            }
        };

        if count > 0 {
            report.existing += 1;
            continue;
        }

        match store.insert(book).await {
            Ok(()) => {
                tracing::info!(book_id = %book.id, title = %book.title, "inserted default book");
                report.inserted += 1;
            }
            // Another instance seeded it between our count and insert.
            Err(err) if err.is_duplicate() => report.existing += 1,
            Err(err) => {
                tracing::warn!(book_id = %book.id, error = %err, "failed to insert default book");
                report.failed += 1;
            }
        }
    }

    report
}
