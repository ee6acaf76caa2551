//! Owner repository

use catalog_repository::{delegate_crud, Condition, RepoResult, SoftDeleteCrudRepository};
use sqlx::PgPool;

use crate::domain::entities::Owner;

#[derive(Clone)]
pub struct OwnerRepository {
    crud: SoftDeleteCrudRepository<Owner>,
}

impl OwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: SoftDeleteCrudRepository::new(pool),
        }
    }

    /// Find a live owner by exact name
    pub async fn get_by_name(&self, name: &str) -> RepoResult<Option<Owner>> {
        self.crud.find_where(vec![Condition::eq("name", name)]).await
    }
}

delegate_crud!(OwnerRepository, Owner, crud);
