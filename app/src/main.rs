use kit::{logging, Config, LogConfig, Server, DB};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use todo_app::migrations::Migrator;
use todo_app::{bootstrap, config, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let environment = Config::init(Path::new("."));
    config::register_all();

    logging::init(&Config::get::<LogConfig>().unwrap_or_default())?;
    tracing::info!(%environment, "starting");

    let db = DB::init().await?;
    Migrator::up(db.inner(), None).await?;

    bootstrap::register(db);

    Server::from_config(routes::router()).run().await
}
