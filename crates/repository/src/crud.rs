//! Generic CRUD contract and its PostgreSQL implementation

use std::marker::PhantomData;

use async_trait::async_trait;
use catalog_common::{Page, Pagination, RepoResult, RepositoryError};
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::condition::{push_where, Condition, Value};
use crate::table::Table;

/// PostgreSQL accepts at most this many bind parameters per statement
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Rows per statement for a multi-row write binding `columns` values per row
pub fn chunk_size(columns: usize) -> usize {
    (MAX_BIND_PARAMS / columns.max(1)).max(1)
}

/// Column assignments of one row
pub type Assignments = Vec<(&'static str, Value)>;

/// CRUD operations shared by every id-keyed repository
#[async_trait]
pub trait CrudRepository<T: Table>: Send + Sync {
    /// Fetch a row by id; `None` when it does not exist
    async fn get(&self, id: i64) -> RepoResult<Option<T>>;

    /// One page of rows, optionally filtered by a name substring
    async fn list(&self, pagination: Pagination, query: Option<&str>) -> RepoResult<Page<T>>;

    /// Like [`CrudRepository::list`], restricted to the given ids
    async fn list_by_ids(
        &self,
        pagination: Pagination,
        query: Option<&str>,
        ids: &[i64],
    ) -> RepoResult<Page<T>>;

    async fn create(&self, entity: &T) -> RepoResult<T>;

    /// Update the row identified by the entity id.
    ///
    /// Fails with `NotFound` when no row matches.
    async fn update(&self, entity: &T) -> RepoResult<T>;

    async fn bulk_create(&self, entities: &[T]) -> RepoResult<Vec<T>>;

    /// Update every entity in a single transaction
    async fn bulk_update(&self, entities: &[T]) -> RepoResult<Vec<T>>;

    /// Remove a row, returning it as it was; `None` when nothing matched
    async fn delete(&self, id: i64) -> RepoResult<Option<T>>;
}

/// Hard-delete CRUD repository for any [`Table`]
pub struct PgCrudRepository<T> {
    pool: PgPool,
    _table: PhantomData<fn() -> T>,
}

impl<T> Clone for PgCrudRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _table: PhantomData,
        }
    }
}

impl<T: Table> PgCrudRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _table: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn id_condition(&self, id: i64) -> Vec<Condition> {
        vec![Condition::eq(T::ID, id)]
    }

    pub fn list_condition(&self, query: Option<&str>, ids: Option<&[i64]>) -> Vec<Condition> {
        let mut conditions = Vec::new();

        let query = query.map(str::trim).filter(|q| !q.is_empty());
        if let (Some(column), Some(query)) = (T::NAME, query) {
            conditions.push(Condition::ContainsIgnoreCase(column, query.to_string()));
        }

        if let Some(ids) = ids {
            conditions.push(Condition::AnyOf(T::ID, ids.to_vec()));
        }

        conditions
    }

    /// First row (by id) matching every condition
    pub async fn find_where(&self, conditions: Vec<Condition>) -> RepoResult<Option<T>> {
        let mut builder = select_query::<T>(conditions);
        builder.push(" LIMIT 1");
        let row = builder
            .build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn fetch_all_where(&self, conditions: Vec<Condition>) -> RepoResult<Vec<T>> {
        let mut builder = select_query::<T>(conditions);
        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn page_where(
        &self,
        conditions: Vec<Condition>,
        pagination: Pagination,
    ) -> RepoResult<Page<T>> {
        let mut count = count_query::<T>(conditions.clone());
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut builder = page_query::<T>(conditions, pagination);
        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(Page::new(rows, total, pagination))
    }

    pub async fn insert_one(&self, entity: &T) -> RepoResult<T> {
        let mut builder = insert_query::<T>(vec![entity.values()])?;
        let row = builder.build_query_as::<T>().fetch_one(&self.pool).await?;
        tracing::debug!(table = T::TABLE, id = ?row.id(), "Inserted row");
        Ok(row)
    }

    /// Multi-row insert preserving input order; split into several
    /// statements inside one transaction when the bind limit demands it.
    pub async fn insert_all(&self, entities: &[T]) -> RepoResult<Vec<T>> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<Assignments> = entities.iter().map(Table::values).collect();
        let rows_per_statement = chunk_size(rows[0].len());

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(entities.len());
        for chunk in rows.chunks(rows_per_statement) {
            let mut builder = insert_query::<T>(chunk.to_vec())?;
            let created = builder.build_query_as::<T>().fetch_all(&mut *tx).await?;
            inserted.extend(created);
        }
        tx.commit().await?;

        tracing::debug!(table = T::TABLE, count = inserted.len(), "Inserted rows");
        Ok(inserted)
    }

    /// Apply assignments to the first row matching the conditions
    pub async fn update_where(
        &self,
        assignments: Assignments,
        conditions: Vec<Condition>,
    ) -> RepoResult<Option<T>> {
        let mut builder = update_query::<T>(assignments, conditions);
        let row = builder
            .build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Run several updates in one transaction; any miss rolls everything back
    pub async fn update_all(&self, targets: Vec<(Assignments, Vec<Condition>)>) -> RepoResult<Vec<T>> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(targets.len());
        for (assignments, conditions) in targets {
            let mut builder = update_query::<T>(assignments, conditions);
            let row = builder
                .build_query_as::<T>()
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepositoryError::NotFound)?;
            updated.push(row);
        }
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn delete_where(&self, conditions: Vec<Condition>) -> RepoResult<Option<T>> {
        let mut builder = delete_query::<T>(conditions);
        let row = builder
            .build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl<T: Table> CrudRepository<T> for PgCrudRepository<T> {
    async fn get(&self, id: i64) -> RepoResult<Option<T>> {
        self.find_where(self.id_condition(id)).await
    }

    async fn list(&self, pagination: Pagination, query: Option<&str>) -> RepoResult<Page<T>> {
        self.page_where(self.list_condition(query, None), pagination)
            .await
    }

    async fn list_by_ids(
        &self,
        pagination: Pagination,
        query: Option<&str>,
        ids: &[i64],
    ) -> RepoResult<Page<T>> {
        self.page_where(self.list_condition(query, Some(ids)), pagination)
            .await
    }

    async fn create(&self, entity: &T) -> RepoResult<T> {
        self.insert_one(entity).await
    }

    async fn update(&self, entity: &T) -> RepoResult<T> {
        let id = require_id(entity)?;
        self.update_where(entity_assignments(entity), self.id_condition(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn bulk_create(&self, entities: &[T]) -> RepoResult<Vec<T>> {
        self.insert_all(entities).await
    }

    async fn bulk_update(&self, entities: &[T]) -> RepoResult<Vec<T>> {
        let targets = entities
            .iter()
            .map(|entity| -> RepoResult<_> {
                let id = require_id(entity)?;
                Ok((entity_assignments(entity), self.id_condition(id)))
            })
            .collect::<RepoResult<Vec<_>>>()?;
        self.update_all(targets).await
    }

    async fn delete(&self, id: i64) -> RepoResult<Option<T>> {
        let deleted = self.delete_where(self.id_condition(id)).await?;
        if deleted.is_some() {
            tracing::debug!(table = T::TABLE, id, "Deleted row");
        }
        Ok(deleted)
    }
}

/// The entity's writable columns plus a fresh `updated_at` stamp
pub fn entity_assignments<T: Table>(entity: &T) -> Assignments {
    let mut assignments = entity.values();
    if let Some(column) = T::UPDATED_AT {
        assignments.retain(|(c, _)| *c != column);
        assignments.push((column, Value::from(Utc::now())));
    }
    assignments
}

pub(crate) fn require_id<T: Table>(entity: &T) -> RepoResult<i64> {
    entity.id().ok_or_else(|| {
        RepositoryError::InvalidData(format!("cannot update a {} row without an id", T::TABLE))
    })
}

pub(crate) fn select_query<T: Table>(conditions: Vec<Condition>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", T::TABLE));
    push_where(&mut builder, conditions);
    builder.push(" ORDER BY ").push(T::ID);
    builder
}

pub(crate) fn page_query<T: Table>(
    conditions: Vec<Condition>,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = select_query::<T>(conditions);
    builder
        .push(" LIMIT ")
        .push_bind(pagination.limit())
        .push(" OFFSET ")
        .push_bind(pagination.offset());
    builder
}

pub(crate) fn count_query<T: Table>(conditions: Vec<Condition>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
    push_where(&mut builder, conditions);
    builder
}

pub(crate) fn insert_query<T: Table>(
    rows: Vec<Assignments>,
) -> RepoResult<QueryBuilder<'static, Postgres>> {
    let columns: Vec<&'static str> = match rows.first() {
        Some(first) if !first.is_empty() => first.iter().map(|(c, _)| *c).collect(),
        _ => {
            return Err(RepositoryError::InvalidData(format!(
                "no columns to insert into {}",
                T::TABLE
            )))
        }
    };

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES ",
        T::TABLE,
        columns.join(", ")
    ));

    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != columns.len() || row.iter().zip(&columns).any(|((c, _), e)| c != e) {
            return Err(RepositoryError::InvalidData(format!(
                "row {} does not match the column list of {}",
                i,
                T::TABLE
            )));
        }
        if i > 0 {
            builder.push(", ");
        }
        builder.push("(");
        for (j, (_, value)) in row.into_iter().enumerate() {
            if j > 0 {
                builder.push(", ");
            }
            value.push_bind(&mut builder);
        }
        builder.push(")");
    }

    builder.push(" RETURNING *");
    Ok(builder)
}

pub(crate) fn update_query<T: Table>(
    assignments: Assignments,
    conditions: Vec<Condition>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
    for (i, (column, value)) in assignments.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column).push(" = ");
        value.push_bind(&mut builder);
    }
    push_where(&mut builder, conditions);
    builder.push(" RETURNING *");
    builder
}

pub(crate) fn delete_query<T: Table>(conditions: Vec<Condition>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("DELETE FROM {}", T::TABLE));
    push_where(&mut builder, conditions);
    builder.push(" RETURNING *");
    builder
}
