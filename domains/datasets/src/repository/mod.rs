//! Repository implementations for the dataset domain

pub mod dataset_fields;
pub mod dataset_versions;

use sqlx::PgPool;

pub use dataset_fields::DatasetFieldRepository;
pub use dataset_versions::DatasetVersionRepository;

/// Combined repository access for the dataset domain
#[derive(Clone)]
pub struct DatasetRepositories {
    pub dataset_versions: DatasetVersionRepository,
    pub dataset_fields: DatasetFieldRepository,
}

impl DatasetRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            dataset_versions: DatasetVersionRepository::new(pool.clone()),
            dataset_fields: DatasetFieldRepository::new(pool),
        }
    }
}
