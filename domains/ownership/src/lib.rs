//! Ownership domain: owners, roles and the ownerships tying them to data entities

pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{
    NameLookup, OwnerRepository, OwnershipRepositories, OwnershipRepository, RoleRepository,
};
pub use service::{
    NamedEntityService, OwnerService, OwnershipService, OwnershipServices, RoleService,
};
