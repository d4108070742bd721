//! Migration runner
//!
//! ```text
//! migrate                 run pending migrations
//! migrate rollback [n]    roll back the last n migrations (default 1)
//! migrate status          list applied and pending migrations
//! migrate fresh           drop every table and re-run all migrations
//! ```

use clap::{Parser, Subcommand};
use kit::{logging, Config, DatabaseConfig, DbConnection, LogConfig};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use todo_app::migrations::Migrator;

#[derive(Parser)]
#[command(name = "migrate", about = "Manage the to_do database schema")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run all pending migrations
    Up,
    /// Roll back applied migrations
    Rollback {
        #[arg(default_value_t = 1)]
        steps: u32,
    },
    /// Show migration status
    Status,
    /// Drop all tables and re-run migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    Config::init(Path::new("."));
    logging::init(&Config::get::<LogConfig>().unwrap_or_default())?;

    let db = DbConnection::connect(&DatabaseConfig::from_env()).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            Migrator::up(db.inner(), None).await?;
            tracing::info!("migrations completed");
        }
        Command::Rollback { steps } => {
            Migrator::down(db.inner(), Some(steps)).await?;
            tracing::info!(steps, "rollback completed");
        }
        Command::Status => {
            Migrator::status(db.inner()).await?;
        }
        Command::Fresh => {
            tracing::warn!("dropping all tables and re-running migrations");
            Migrator::fresh(db.inner()).await?;
            tracing::info!("database refreshed");
        }
    }

    Ok(())
}
