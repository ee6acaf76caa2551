//! Role repository

use catalog_repository::{delegate_crud, Condition, RepoResult, SoftDeleteCrudRepository};
use sqlx::PgPool;

use crate::domain::entities::Role;

#[derive(Clone)]
pub struct RoleRepository {
    crud: SoftDeleteCrudRepository<Role>,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: SoftDeleteCrudRepository::new(pool),
        }
    }

    /// Find a live role by exact name
    pub async fn get_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        self.crud.find_where(vec![Condition::eq("name", name)]).await
    }
}

delegate_crud!(RoleRepository, Role, crud);
