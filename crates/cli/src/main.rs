use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_db::BookStore;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry, ServiceKind};

/// Book catalogue services backed by a document store.
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve GET /api/books and GET /api/books/{id}; seeds the default books
    Read,
    /// Serve POST /api/books
    Write,
    /// Serve DELETE /api/books/{id}
    Delete,
    /// Serve the HTML frontend
    Frontend,
    /// Provision the collection, insert missing default books, and exit
    Seed,
}

impl Command {
    fn service(&self) -> Option<ServiceKind> {
        match self {
            Command::Read => Some(ServiceKind::Read),
            Command::Write => Some(ServiceKind::Write),
            Command::Delete => Some(ServiceKind::Delete),
            Command::Frontend => Some(ServiceKind::Frontend),
            Command::Seed => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        database = %settings.database.name,
        collection = %settings.database.collection,
        "bookshelf bootstrap starting"
    );

    let store = bookshelf_db::connect(&settings.database)
        .await
        .context("failed to prepare document store")?;

    match cli.command.service() {
        Some(service) => serve(service, &settings, store).await,
        None => {
            let report = bookshelf_db::seed_defaults(store.as_ref()).await;
            tracing::info!(
                inserted = report.inserted,
                existing = report.existing,
                failed = report.failed,
                "seeding finished"
            );
            if report.failed > 0 {
                anyhow::bail!("{} default books could not be seeded", report.failed);
            }
            Ok(())
        }
    }
}

async fn serve(service: ServiceKind, settings: &Settings, store: Arc<dyn BookStore>) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    bookshelf_app::modules::register_all(&mut registry, service, store);

    let ctx = InitCtx { settings, service };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings, service).await;
    registry.stop_modules().await?;
    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_map_to_services() {
        let cli = Cli::try_parse_from(["bookshelf", "frontend"]).unwrap();
        assert_eq!(cli.command.service(), Some(ServiceKind::Frontend));

        let cli = Cli::try_parse_from(["bookshelf", "seed"]).unwrap();
        assert_eq!(cli.command.service(), None);

        assert!(Cli::try_parse_from(["bookshelf", "update"]).is_err());
    }
}
