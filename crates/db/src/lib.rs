//! Document store access for the book catalogue.
//!
//! Every gateway talks to the store through [`BookStore`]. Production services
//! use [`MongoBookStore`]; tests and local tooling use [`MemoryBookStore`].

pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod provision;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryBookStore;
pub use model::Book;
pub use mongo::MongoBookStore;
pub use seed::{seed_defaults, SeedReport};
pub use store::BookStore;

use std::sync::Arc;

use bookshelf_kernel::settings::DatabaseSettings;

/// Connect to the configured store and provision its collection.
///
/// Any failure here is a setup failure: callers must not start serving.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn BookStore>> {
    let store = MongoBookStore::connect(settings).await?;
    Ok(Arc::new(store))
}
