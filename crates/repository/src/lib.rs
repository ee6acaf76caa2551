//! Generic repositories for the data catalog
//!
//! - [`Table`] describes how an entity maps onto a table
//! - [`PgCrudRepository`] implements [`CrudRepository`] with hard deletes
//! - [`SoftDeleteCrudRepository`] decorates it with a soft-delete marker
//! - [`delegate_crud!`] forwards the CRUD contract from a per-entity
//!   repository to the generic one it wraps

pub mod condition;
pub mod crud;
pub mod soft_delete;
pub mod table;

pub use async_trait::async_trait;
pub use catalog_common::{Page, Pagination, RepoResult, RepositoryError};
pub use condition::{Condition, Value};
pub use crud::{
    chunk_size, entity_assignments, Assignments, CrudRepository, PgCrudRepository,
    MAX_BIND_PARAMS,
};
pub use soft_delete::SoftDeleteCrudRepository;
pub use table::{SoftDeleteColumns, Table};

/// Implement [`CrudRepository`] for a repository by forwarding every call
/// to one of its fields.
///
/// ```ignore
/// delegate_crud!(OwnerRepository, Owner, crud);
/// ```
#[macro_export]
macro_rules! delegate_crud {
    ($repo:ty, $entity:ty, $field:ident) => {
        #[$crate::async_trait]
        impl $crate::CrudRepository<$entity> for $repo {
            async fn get(&self, id: i64) -> $crate::RepoResult<Option<$entity>> {
                $crate::CrudRepository::get(&self.$field, id).await
            }

            async fn list(
                &self,
                pagination: $crate::Pagination,
                query: Option<&str>,
            ) -> $crate::RepoResult<$crate::Page<$entity>> {
                $crate::CrudRepository::list(&self.$field, pagination, query).await
            }

            async fn list_by_ids(
                &self,
                pagination: $crate::Pagination,
                query: Option<&str>,
                ids: &[i64],
            ) -> $crate::RepoResult<$crate::Page<$entity>> {
                $crate::CrudRepository::list_by_ids(&self.$field, pagination, query, ids).await
            }

            async fn create(&self, entity: &$entity) -> $crate::RepoResult<$entity> {
                $crate::CrudRepository::create(&self.$field, entity).await
            }

            async fn update(&self, entity: &$entity) -> $crate::RepoResult<$entity> {
                $crate::CrudRepository::update(&self.$field, entity).await
            }

            async fn bulk_create(
                &self,
                entities: &[$entity],
            ) -> $crate::RepoResult<Vec<$entity>> {
                $crate::CrudRepository::bulk_create(&self.$field, entities).await
            }

            async fn bulk_update(
                &self,
                entities: &[$entity],
            ) -> $crate::RepoResult<Vec<$entity>> {
                $crate::CrudRepository::bulk_update(&self.$field, entities).await
            }

            async fn delete(&self, id: i64) -> $crate::RepoResult<Option<$entity>> {
                $crate::CrudRepository::delete(&self.$field, id).await
            }
        }
    };
}
