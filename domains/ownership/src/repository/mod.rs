//! Repository implementations for the ownership domain

pub mod owners;
pub mod ownerships;
pub mod roles;

use catalog_repository::{async_trait, CrudRepository, RepoResult};
use sqlx::PgPool;

use crate::domain::entities::{Owner, Role};

pub use owners::OwnerRepository;
pub use ownerships::OwnershipRepository;
pub use roles::RoleRepository;

/// CRUD repository that can also look rows up by their unique name
#[async_trait]
pub trait NameLookup<T: catalog_repository::Table>: CrudRepository<T> {
    async fn get_by_name(&self, name: &str) -> RepoResult<Option<T>>;
}

#[async_trait]
impl NameLookup<Owner> for OwnerRepository {
    async fn get_by_name(&self, name: &str) -> RepoResult<Option<Owner>> {
        OwnerRepository::get_by_name(self, name).await
    }
}

#[async_trait]
impl NameLookup<Role> for RoleRepository {
    async fn get_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        RoleRepository::get_by_name(self, name).await
    }
}

/// Combined repository access for the ownership domain
#[derive(Clone)]
pub struct OwnershipRepositories {
    pub owners: OwnerRepository,
    pub roles: RoleRepository,
    pub ownerships: OwnershipRepository,
}

impl OwnershipRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            owners: OwnerRepository::new(pool.clone()),
            roles: RoleRepository::new(pool.clone()),
            ownerships: OwnershipRepository::new(pool),
        }
    }
}
