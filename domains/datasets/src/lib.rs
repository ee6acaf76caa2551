//! Dataset domain: versions of a dataset's structure and the fields they contain

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{DatasetFieldRepository, DatasetRepositories, DatasetVersionRepository};
