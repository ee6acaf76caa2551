//! Data entity repository

use catalog_repository::{delegate_crud, Condition, RepoResult, SoftDeleteCrudRepository};
use sqlx::PgPool;

use crate::domain::entities::DataEntity;

#[derive(Clone)]
pub struct DataEntityRepository {
    crud: SoftDeleteCrudRepository<DataEntity>,
}

impl DataEntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: SoftDeleteCrudRepository::new(pool),
        }
    }

    /// Find a live data entity by its oddrn
    pub async fn get_by_oddrn(&self, oddrn: &str) -> RepoResult<Option<DataEntity>> {
        self.crud
            .find_where(vec![Condition::eq("oddrn", oddrn)])
            .await
    }
}

delegate_crud!(DataEntityRepository, DataEntity, crud);
