//! Administrative command handlers.
//!
//! CLI entry points for maintenance tasks that talk to the database
//! directly, without starting the HTTP server.

use crate::config::Config;
use crate::db::{MappingStore, Repository};
use crate::error::AppResult;
use crate::services::{ShortCodeGenerator, ShortenerService};
use clap::Subcommand;
use std::sync::Arc;
use tracing::info;

/// Administrative commands available via CLI.
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Run database migrations
    Migrate,

    /// Show statistics
    Stats,

    /// Print the original URL stored under a short code
    Lookup {
        /// Short code to resolve
        code: String,
    },
}

/// Run an administrative command with the given configuration.
pub async fn run(config: Config, admin_command: AdminCommands) -> AppResult<()> {
    let repository = Repository::new(&config.database).await?;

    let result = match admin_command {
        AdminCommands::Migrate => migrate(&repository).await,
        AdminCommands::Stats => stats(&repository).await,
        AdminCommands::Lookup { code } => lookup(&config, &repository, &code).await,
    };

    repository.close().await;
    result
}

/// Run database migrations.
async fn migrate(repository: &Repository) -> AppResult<()> {
    info!("Running database migrations...");
    repository.run_migrations().await?;
    info!("Migrations completed successfully");
    Ok(())
}

/// Display statistics.
async fn stats(repository: &Repository) -> AppResult<()> {
    info!("Fetching statistics...");

    let total = repository.count_mappings().await?;

    println!("\n=== shrtn Statistics ===");
    println!("Total mappings:  {}", total);
    println!();

    Ok(())
}

/// Resolve a code through the same path the HTTP API uses.
async fn lookup(config: &Config, repository: &Repository, code: &str) -> AppResult<()> {
    let store: Arc<dyn MappingStore> = Arc::new(repository.clone());
    let shortener = ShortenerService::new(store, ShortCodeGenerator::new(), &config.shortener);

    let url = shortener.resolve(code).await?;
    println!("{}", url);

    Ok(())
}
