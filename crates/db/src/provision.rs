//! Collection provisioning, run once at service start.

use anyhow::Context;
use async_trait::async_trait;

/// The introspection and DDL calls provisioning needs from a database.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn collection_names(&self) -> anyhow::Result<Vec<String>>;

    async fn create_collection(&self, name: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl Catalog for mongodb::Database {
    async fn collection_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.list_collection_names().await?)
    }

    async fn create_collection(&self, name: &str) -> anyhow::Result<()> {
        mongodb::Database::create_collection(self, name).await?;
        Ok(())
    }
}

/// Make sure `name` exists, creating it when the catalog does not list it.
///
/// Returns `true` when the collection was created by this call. Safe to run on
/// every start.
pub async fn ensure_collection<C>(catalog: &C, name: &str) -> anyhow::Result<bool>
where
    C: Catalog + ?Sized,
{
    let names = catalog
        .collection_names()
        .await
        .context("failed to list collection names")?;

    if names.iter().any(|existing| existing == name) {
        tracing::debug!(collection = name, "collection already present");
        return Ok(false);
    }

    catalog
        .create_collection(name)
        .await
        .with_context(|| format!("failed to create collection '{name}'"))?;
    tracing::info!(collection = name, "created collection");
    Ok(true)
}
