//! Data catalog composition root
//!
//! Wires every domain's repositories and services onto one connection pool.

use catalog_common::{db, Config};
use catalog_datasets::DatasetRepositories;
use catalog_metadata::MetadataRepositories;
use catalog_ownership::{OwnershipRepositories, OwnershipServices};
use sqlx::PgPool;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Repositories and services of all domains
#[derive(Clone)]
pub struct Catalog {
    pool: PgPool,
    pub metadata: MetadataRepositories,
    pub ownership: OwnershipRepositories,
    pub datasets: DatasetRepositories,
    pub services: OwnershipServices,
}

impl Catalog {
    pub fn new(pool: PgPool) -> Self {
        let ownership = OwnershipRepositories::new(pool.clone());
        Self {
            metadata: MetadataRepositories::new(pool.clone()),
            services: OwnershipServices::from_repositories(ownership.clone()),
            ownership,
            datasets: DatasetRepositories::new(pool.clone()),
            pool,
        }
    }

    /// Connect using the configured pool settings
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = db::connect(config)
            .await
            .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
