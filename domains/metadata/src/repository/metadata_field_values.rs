//! Metadata field value repository
//!
//! Values are keyed by `(data_entity_id, metadata_field_id)` rather than a
//! surrogate id, so this repository does not use the generic CRUD contract.

use catalog_common::{RepoResult, RepositoryError};
use catalog_repository::chunk_size;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{MetadataDto, MetadataField, MetadataFieldValue};

const VALUE_COLUMNS: &str = "data_entity_id, metadata_field_id, value, active";
const VALUE_COLUMN_COUNT: usize = 4;

/// Joined row of a value and its metadata field
#[derive(Debug, sqlx::FromRow)]
struct MetadataDtoRow {
    field_id: i64,
    field_name: Option<String>,
    field_type: Option<String>,
    field_origin: Option<String>,
    field_is_deleted: bool,
    data_entity_id: i64,
    metadata_field_id: i64,
    value: Option<String>,
    active: bool,
}

impl From<MetadataDtoRow> for MetadataDto {
    fn from(row: MetadataDtoRow) -> Self {
        MetadataDto {
            metadata_field: MetadataField {
                id: Some(row.field_id),
                name: row.field_name,
                field_type: row.field_type,
                origin: row.field_origin,
                is_deleted: row.field_is_deleted,
            },
            metadata_field_value: MetadataFieldValue {
                data_entity_id: row.data_entity_id,
                metadata_field_id: row.metadata_field_id,
                value: row.value,
                active: row.active,
            },
        }
    }
}

#[derive(Clone)]
pub struct MetadataFieldValueRepository {
    pool: PgPool,
}

impl MetadataFieldValueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, value: &MetadataFieldValue) -> RepoResult<MetadataFieldValue> {
        let created = sqlx::query_as::<_, MetadataFieldValue>(&format!(
            "INSERT INTO metadata_field_value ({VALUE_COLUMNS}) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {VALUE_COLUMNS}"
        ))
        .bind(value.data_entity_id)
        .bind(value.metadata_field_id)
        .bind(&value.value)
        .bind(value.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Overwrite value and active flag of an existing key
    pub async fn update(&self, value: &MetadataFieldValue) -> RepoResult<MetadataFieldValue> {
        let updated = sqlx::query_as::<_, MetadataFieldValue>(&format!(
            "UPDATE metadata_field_value SET value = $3, active = $4 \
             WHERE data_entity_id = $1 AND metadata_field_id = $2 \
             RETURNING {VALUE_COLUMNS}"
        ))
        .bind(value.data_entity_id)
        .bind(value.metadata_field_id)
        .bind(&value.value)
        .bind(value.active)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    /// Insert all values in one transaction, returned in input order
    pub async fn bulk_create(
        &self,
        values: &[MetadataFieldValue],
    ) -> RepoResult<Vec<MetadataFieldValue>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(values.len());
        for chunk in values.chunks(chunk_size(VALUE_COLUMN_COUNT)) {
            let mut builder = bulk_insert_query(chunk);
            let inserted = builder
                .build_query_as::<MetadataFieldValue>()
                .fetch_all(&mut *tx)
                .await?;
            created.extend(inserted);
        }
        tx.commit().await?;

        tracing::debug!(count = created.len(), "Created metadata field values");
        Ok(created)
    }

    /// All values attached to any of the given data entities
    pub async fn list_by_data_entity_ids(
        &self,
        data_entity_ids: &[i64],
    ) -> RepoResult<Vec<MetadataFieldValue>> {
        if data_entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let values = sqlx::query_as::<_, MetadataFieldValue>(&format!(
            "SELECT {VALUE_COLUMNS} FROM metadata_field_value \
             WHERE data_entity_id = ANY($1) \
             ORDER BY data_entity_id, metadata_field_id"
        ))
        .bind(data_entity_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    /// Values of one data entity joined with their live metadata fields
    pub async fn get_dtos_by_data_entity_id(
        &self,
        data_entity_id: i64,
    ) -> RepoResult<Vec<MetadataDto>> {
        let rows = sqlx::query_as::<_, MetadataDtoRow>(
            r#"
            SELECT mf.id AS field_id, mf.name AS field_name, mf.type AS field_type,
                   mf.origin AS field_origin, mf.is_deleted AS field_is_deleted,
                   mfv.data_entity_id, mfv.metadata_field_id, mfv.value, mfv.active
            FROM metadata_field_value mfv
            INNER JOIN metadata_field mf ON mf.id = mfv.metadata_field_id
            WHERE mfv.data_entity_id = $1 AND mf.is_deleted = FALSE
            ORDER BY mf.id
            "#,
        )
        .bind(data_entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MetadataDto::from).collect())
    }

    /// Remove the value of one field from one data entity
    pub async fn delete(
        &self,
        data_entity_id: i64,
        metadata_field_id: i64,
    ) -> RepoResult<Option<MetadataFieldValue>> {
        let deleted = sqlx::query_as::<_, MetadataFieldValue>(&format!(
            "DELETE FROM metadata_field_value \
             WHERE data_entity_id = $1 AND metadata_field_id = $2 \
             RETURNING {VALUE_COLUMNS}"
        ))
        .bind(data_entity_id)
        .bind(metadata_field_id)
        .fetch_optional(&self.pool)
        .await?;

        if deleted.is_some() {
            tracing::debug!(data_entity_id, metadata_field_id, "Deleted metadata field value");
        }
        Ok(deleted)
    }
}

fn bulk_insert_query(values: &[MetadataFieldValue]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO metadata_field_value ({VALUE_COLUMNS}) "
    ));
    builder.push_values(values, |mut row, value| {
        row.push_bind(value.data_entity_id)
            .push_bind(value.metadata_field_id)
            .push_bind(&value.value)
            .push_bind(value.active);
    });
    builder.push(format!(" RETURNING {VALUE_COLUMNS}"));
    builder
}
