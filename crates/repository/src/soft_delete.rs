//! Soft-delete decorator over [`PgCrudRepository`]
//!
//! Every read and update goes through the inner repository with an extra
//! `deleted = FALSE` predicate appended; `delete` flips the marker instead
//! of removing the row.

use async_trait::async_trait;
use catalog_common::{Page, Pagination, RepoResult, RepositoryError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::condition::{Condition, Value};
use crate::crud::{entity_assignments, require_id, Assignments, CrudRepository, PgCrudRepository};
use crate::table::{SoftDeleteColumns, Table};

pub struct SoftDeleteCrudRepository<T> {
    inner: PgCrudRepository<T>,
    columns: SoftDeleteColumns,
}

impl<T> Clone for SoftDeleteCrudRepository<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            columns: self.columns,
        }
    }
}

impl<T: Table> SoftDeleteCrudRepository<T> {
    /// Uses the `is_deleted` / `deleted_at` columns
    pub fn new(pool: PgPool) -> Self {
        Self::with_columns(pool, SoftDeleteColumns::DEFAULT)
    }

    pub fn with_columns(pool: PgPool, columns: SoftDeleteColumns) -> Self {
        Self {
            inner: PgCrudRepository::new(pool),
            columns,
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.inner.pool()
    }

    /// Append the live-rows predicate to a condition list
    pub fn add_soft_delete_filter(&self, mut conditions: Vec<Condition>) -> Vec<Condition> {
        conditions.push(Condition::IsFalse(self.columns.deleted));
        conditions
    }

    pub fn id_condition(&self, id: i64) -> Vec<Condition> {
        self.add_soft_delete_filter(self.inner.id_condition(id))
    }

    pub fn list_condition(&self, query: Option<&str>, ids: Option<&[i64]>) -> Vec<Condition> {
        self.add_soft_delete_filter(self.inner.list_condition(query, ids))
    }

    /// Columns written when a row is soft-deleted
    pub fn delete_assignments(&self, now: DateTime<Utc>) -> Assignments {
        let mut assignments = vec![(self.columns.deleted, Value::from(true))];
        if let Some(column) = self.columns.deleted_at {
            assignments.push((column, Value::from(now)));
        }
        if let Some(column) = T::UPDATED_AT {
            assignments.push((column, Value::from(now)));
        }
        assignments
    }

    pub async fn find_where(&self, conditions: Vec<Condition>) -> RepoResult<Option<T>> {
        self.inner
            .find_where(self.add_soft_delete_filter(conditions))
            .await
    }

    pub async fn fetch_all_where(&self, conditions: Vec<Condition>) -> RepoResult<Vec<T>> {
        self.inner
            .fetch_all_where(self.add_soft_delete_filter(conditions))
            .await
    }

    pub async fn page_where(
        &self,
        conditions: Vec<Condition>,
        pagination: Pagination,
    ) -> RepoResult<Page<T>> {
        self.inner
            .page_where(self.add_soft_delete_filter(conditions), pagination)
            .await
    }

    pub async fn update_where(
        &self,
        assignments: Assignments,
        conditions: Vec<Condition>,
    ) -> RepoResult<Option<T>> {
        self.inner
            .update_where(assignments, self.add_soft_delete_filter(conditions))
            .await
    }
}

#[async_trait]
impl<T: Table> CrudRepository<T> for SoftDeleteCrudRepository<T> {
    async fn get(&self, id: i64) -> RepoResult<Option<T>> {
        self.inner.find_where(self.id_condition(id)).await
    }

    async fn list(&self, pagination: Pagination, query: Option<&str>) -> RepoResult<Page<T>> {
        self.inner
            .page_where(self.list_condition(query, None), pagination)
            .await
    }

    async fn list_by_ids(
        &self,
        pagination: Pagination,
        query: Option<&str>,
        ids: &[i64],
    ) -> RepoResult<Page<T>> {
        self.inner
            .page_where(self.list_condition(query, Some(ids)), pagination)
            .await
    }

    async fn create(&self, entity: &T) -> RepoResult<T> {
        self.inner.insert_one(entity).await
    }

    async fn update(&self, entity: &T) -> RepoResult<T> {
        let id = require_id(entity)?;
        self.inner
            .update_where(entity_assignments(entity), self.id_condition(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn bulk_create(&self, entities: &[T]) -> RepoResult<Vec<T>> {
        self.inner.insert_all(entities).await
    }

    async fn bulk_update(&self, entities: &[T]) -> RepoResult<Vec<T>> {
        let targets = entities
            .iter()
            .map(|entity| -> RepoResult<_> {
                let id = require_id(entity)?;
                Ok((entity_assignments(entity), self.id_condition(id)))
            })
            .collect::<RepoResult<Vec<_>>>()?;
        self.inner.update_all(targets).await
    }

    async fn delete(&self, id: i64) -> RepoResult<Option<T>> {
        let deleted = self
            .inner
            .update_where(self.delete_assignments(Utc::now()), self.id_condition(id))
            .await?;
        if deleted.is_some() {
            tracing::debug!(table = T::TABLE, id, "Soft-deleted row");
        }
        Ok(deleted)
    }
}
