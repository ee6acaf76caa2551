//! Metadata domain: data entities, metadata fields and metadata field values

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    DataEntityRepository, MetadataFieldRepository, MetadataFieldValueRepository,
    MetadataRepositories,
};
