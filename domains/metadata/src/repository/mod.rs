//! Repository implementations for the metadata domain

pub mod data_entities;
pub mod metadata_field_values;
pub mod metadata_fields;

use sqlx::PgPool;

pub use data_entities::DataEntityRepository;
pub use metadata_field_values::MetadataFieldValueRepository;
pub use metadata_fields::MetadataFieldRepository;

/// Combined repository access for the metadata domain
#[derive(Clone)]
pub struct MetadataRepositories {
    pub data_entities: DataEntityRepository,
    pub metadata_fields: MetadataFieldRepository,
    pub metadata_field_values: MetadataFieldValueRepository,
}

impl MetadataRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            data_entities: DataEntityRepository::new(pool.clone()),
            metadata_fields: MetadataFieldRepository::new(pool.clone()),
            metadata_field_values: MetadataFieldValueRepository::new(pool),
        }
    }
}
