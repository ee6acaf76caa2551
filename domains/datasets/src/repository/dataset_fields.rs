//! Dataset field repository

use catalog_repository::{delegate_crud, Condition, PgCrudRepository, RepoResult};
use sqlx::PgPool;

use crate::domain::entities::DatasetField;

#[derive(Clone)]
pub struct DatasetFieldRepository {
    crud: PgCrudRepository<DatasetField>,
}

impl DatasetFieldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: PgCrudRepository::new(pool),
        }
    }

    pub async fn get_by_oddrn(&self, oddrn: &str) -> RepoResult<Option<DatasetField>> {
        self.crud.find_where(vec![Condition::eq("oddrn", oddrn)]).await
    }
}

delegate_crud!(DatasetFieldRepository, DatasetField, crud);
