use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};

use bookshelf_kernel::settings::DatabaseSettings;

use crate::error::{StoreError, StoreResult};
use crate::model::{Book, BookDocument, ID_FIELD};
use crate::provision;
use crate::store::BookStore;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;
const ID_INDEX_NAME: &str = "book_id_unique";

/// Book store backed by a MongoDB collection.
///
/// The collection handle wraps the driver's connection pool; one instance is
/// built at startup and shared by every handler.
#[derive(Clone, Debug)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connect, ping, provision the collection and its unique `ID` index.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(settings.timeout_ms);

        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .context("failed to parse database connection string")?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some("bookshelf".to_string());

        let client = Client::with_options(options).context("failed to build database client")?;
        let database = client.database(&settings.name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .context("failed to ping database")?;
        tracing::info!(database = %settings.name, "connected and pinged document store");

        provision::ensure_collection(&database, &settings.collection).await?;
        let collection = database.collection::<BookDocument>(&settings.collection);

        let index = IndexModel::builder()
            .keys(doc! { ID_FIELD: 1 })
            .options(
                IndexOptions::builder()
                    .name(ID_INDEX_NAME.to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        collection
            .create_index(index)
            .await
            .context("failed to ensure unique index on book ID")?;

        Ok(Self { collection })
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> StoreResult<Vec<Book>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<BookDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Book>> {
        let found = self.collection.find_one(doc! { ID_FIELD: id }).await?;
        Ok(found.map(Book::from))
    }

    async fn count(&self, id: &str) -> StoreResult<u64> {
        Ok(self.collection.count_documents(doc! { ID_FIELD: id }).await?)
    }

    async fn insert(&self, book: &Book) -> StoreResult<()> {
        match self.collection.insert_one(BookDocument::from(book)).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::Duplicate(book.id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let result = self.collection.delete_one(doc! { ID_FIELD: id }).await?;
        Ok(result.deleted_count)
    }
}
