//! Metadata field repository

use catalog_repository::{
    delegate_crud, Condition, RepoResult, SoftDeleteColumns, SoftDeleteCrudRepository,
};
use sqlx::PgPool;

use crate::domain::entities::{MetadataField, MetadataKey};

#[derive(Clone)]
pub struct MetadataFieldRepository {
    crud: SoftDeleteCrudRepository<MetadataField>,
}

impl MetadataFieldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            // metadata_field has no deleted_at column
            crud: SoftDeleteCrudRepository::with_columns(
                pool,
                SoftDeleteColumns::flag_only("is_deleted"),
            ),
        }
    }

    /// Find a live field by name
    pub async fn get_by_name(&self, name: &str) -> RepoResult<Option<MetadataField>> {
        self.crud
            .find_where(vec![Condition::eq("name", name)])
            .await
    }

    /// Live fields matching any of the `(name, type)` keys
    pub async fn list_by_keys(&self, keys: &[MetadataKey]) -> RepoResult<Vec<MetadataField>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = keys.iter().map(|k| k.name.clone()).collect();
        let types: Vec<String> = keys.iter().map(|k| k.field_type.to_string()).collect();

        let fields = sqlx::query_as::<_, MetadataField>(
            r#"
            SELECT mf.*
            FROM metadata_field mf
            INNER JOIN UNNEST($1::text[], $2::text[]) AS k(name, type)
                ON mf.name = k.name AND mf.type = k.type
            WHERE mf.is_deleted = FALSE
            ORDER BY mf.id
            "#,
        )
        .bind(names)
        .bind(types)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(fields)
    }
}

delegate_crud!(MetadataFieldRepository, MetadataField, crud);
