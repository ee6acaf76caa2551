// Data catalog - schema migration runner

use tracing::{error, info};

use catalog_app::Catalog;
use catalog_common::{logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_tracing(&config)?;

    info!("Running data catalog migrations");

    let catalog = Catalog::connect(&config).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e
    })?;

    catalog.migrate().await.map_err(|e| {
        error!("Migration failed: {}", e);
        e
    })?;

    info!("Migrations complete");
    Ok(())
}
