//! Dataset version repository
//!
//! A dataset is addressed either by its oddrn or by the id of the data
//! entity carrying that oddrn; version lookups by dataset id go through
//! `data_entity`.

use std::collections::HashMap;

use catalog_repository::{
    chunk_size, delegate_crud, CrudRepository, PgCrudRepository, RepoResult,
};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{DatasetField, DatasetStructure, DatasetVersion};

/// Field row tagged with the version it belongs to
#[derive(Debug, sqlx::FromRow)]
struct VersionFieldRow {
    dataset_version_id: i64,
    #[sqlx(flatten)]
    field: DatasetField,
}

#[derive(Clone)]
pub struct DatasetVersionRepository {
    crud: PgCrudRepository<DatasetVersion>,
}

impl DatasetVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: PgCrudRepository::new(pool),
        }
    }

    /// A version with its fields; `None` when the version does not exist
    pub async fn get_dataset_version(
        &self,
        dataset_version_id: i64,
    ) -> RepoResult<Option<DatasetStructure>> {
        match self.crud.get(dataset_version_id).await? {
            Some(version) => self.with_fields(version).await.map(Some),
            None => Ok(None),
        }
    }

    /// Highest version of the dataset behind a data entity, with its fields
    pub async fn get_latest_dataset_version(
        &self,
        dataset_id: i64,
    ) -> RepoResult<Option<DatasetStructure>> {
        let latest = sqlx::query_as::<_, DatasetVersion>(
            r#"
            SELECT dv.*
            FROM dataset_version dv
            INNER JOIN data_entity de ON de.oddrn = dv.dataset_oddrn
            WHERE de.id = $1
            ORDER BY dv.version DESC
            LIMIT 1
            "#,
        )
        .bind(dataset_id)
        .fetch_optional(self.crud.pool())
        .await?;

        match latest {
            Some(version) => self.with_fields(version).await.map(Some),
            None => Ok(None),
        }
    }

    /// Every version of a dataset, oldest first
    pub async fn get_versions(&self, dataset_oddrn: &str) -> RepoResult<Vec<DatasetVersion>> {
        let versions = sqlx::query_as::<_, DatasetVersion>(
            "SELECT * FROM dataset_version WHERE dataset_oddrn = $1 ORDER BY version",
        )
        .bind(dataset_oddrn)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(versions)
    }

    /// The latest version of each of the given datasets
    pub async fn get_latest_versions(&self, dataset_ids: &[i64]) -> RepoResult<Vec<DatasetVersion>> {
        if dataset_ids.is_empty() {
            return Ok(Vec::new());
        }

        let versions = sqlx::query_as::<_, DatasetVersion>(
            r#"
            SELECT DISTINCT ON (dv.dataset_oddrn) dv.*
            FROM dataset_version dv
            INNER JOIN data_entity de ON de.oddrn = dv.dataset_oddrn
            WHERE de.id = ANY($1)
            ORDER BY dv.dataset_oddrn, dv.version DESC
            "#,
        )
        .bind(dataset_ids)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(versions)
    }

    /// For each given version, the closest earlier version of the same dataset.
    ///
    /// Datasets with a single version contribute nothing.
    pub async fn get_penultimate_versions(
        &self,
        last_versions: &[DatasetVersion],
    ) -> RepoResult<Vec<DatasetVersion>> {
        if last_versions.is_empty() {
            return Ok(Vec::new());
        }

        let oddrns: Vec<String> = last_versions
            .iter()
            .map(|v| v.dataset_oddrn.clone())
            .collect();
        let versions: Vec<i64> = last_versions.iter().map(|v| v.version).collect();

        let penultimate = sqlx::query_as::<_, DatasetVersion>(
            r#"
            SELECT DISTINCT ON (dv.dataset_oddrn) dv.*
            FROM dataset_version dv
            INNER JOIN UNNEST($1::text[], $2::bigint[]) AS l(oddrn, version)
                ON dv.dataset_oddrn = l.oddrn AND dv.version < l.version
            ORDER BY dv.dataset_oddrn, dv.version DESC
            "#,
        )
        .bind(oddrns)
        .bind(versions)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(penultimate)
    }

    /// Fields of each version, keyed by version id.
    ///
    /// Every requested id is present in the map, with an empty list when the
    /// version has no linked fields.
    pub async fn get_dataset_version_fields(
        &self,
        dataset_version_ids: &[i64],
    ) -> RepoResult<HashMap<i64, Vec<DatasetField>>> {
        if dataset_version_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, VersionFieldRow>(
            r#"
            SELECT ds.dataset_version_id, df.*
            FROM dataset_structure ds
            INNER JOIN dataset_field df ON df.id = ds.dataset_field_id
            WHERE ds.dataset_version_id = ANY($1)
            ORDER BY ds.dataset_version_id, df.id
            "#,
        )
        .bind(dataset_version_ids)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(group_version_fields(dataset_version_ids, rows))
    }

    /// Link fields to a version, skipping links that already exist.
    ///
    /// Returns the number of new links.
    pub async fn link_fields(&self, dataset_version_id: i64, field_ids: &[i64]) -> RepoResult<u64> {
        if field_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.crud.pool().begin().await?;
        let mut linked = 0;
        for chunk in field_ids.chunks(chunk_size(2)) {
            let mut builder = link_fields_query(dataset_version_id, chunk);
            linked += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        tracing::debug!(dataset_version_id, linked, "Linked dataset fields");
        Ok(linked)
    }

    async fn with_fields(&self, version: DatasetVersion) -> RepoResult<DatasetStructure> {
        let fields = match version.id {
            Some(id) => sqlx::query_as::<_, DatasetField>(
                r#"
                SELECT df.*
                FROM dataset_field df
                INNER JOIN dataset_structure ds ON ds.dataset_field_id = df.id
                WHERE ds.dataset_version_id = $1
                ORDER BY df.id
                "#,
            )
            .bind(id)
            .fetch_all(self.crud.pool())
            .await?,
            None => Vec::new(),
        };

        Ok(DatasetStructure {
            dataset_version: version,
            fields,
        })
    }
}

delegate_crud!(DatasetVersionRepository, DatasetVersion, crud);

fn group_version_fields(
    dataset_version_ids: &[i64],
    rows: Vec<VersionFieldRow>,
) -> HashMap<i64, Vec<DatasetField>> {
    let mut grouped: HashMap<i64, Vec<DatasetField>> = dataset_version_ids
        .iter()
        .map(|id| (*id, Vec::new()))
        .collect();
    for row in rows {
        grouped
            .entry(row.dataset_version_id)
            .or_default()
            .push(row.field);
    }
    grouped
}

fn link_fields_query(dataset_version_id: i64, field_ids: &[i64]) -> QueryBuilder<'_, Postgres> {
    let mut builder =
        QueryBuilder::new("INSERT INTO dataset_structure (dataset_version_id, dataset_field_id) ");
    builder.push_values(field_ids, |mut row, field_id| {
        row.push_bind(dataset_version_id).push_bind(*field_id);
    });
    builder.push(" ON CONFLICT DO NOTHING");
    builder
}
