//! Service for entities addressed by a unique name (owners and roles)

use std::marker::PhantomData;

use catalog_common::{Error, Page, Pagination, RepositoryError, Result};

use crate::domain::entities::NamedEntity;
use crate::domain::validation::normalize_name;
use crate::repository::NameLookup;

/// Name-keyed service over a [`NameLookup`] repository
pub struct NamedEntityService<T, R> {
    repo: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R: Clone> Clone for NamedEntityService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, R> NamedEntityService<T, R>
where
    T: NamedEntity,
    R: NameLookup<T>,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    /// Return the live entity with this name, creating it when absent.
    ///
    /// A concurrent creator winning the unique index is resolved by
    /// reading its row back.
    pub async fn get_or_create(&self, raw_name: &str) -> Result<T> {
        let name = normalize_name(T::KIND, raw_name)?;

        if let Some(existing) = self.repo.get_by_name(&name).await? {
            return Ok(existing);
        }

        match self.repo.create(&T::with_name(name.clone())).await {
            Ok(created) => {
                tracing::info!(kind = T::KIND, name = %name, "Created named entity");
                Ok(created)
            }
            Err(RepositoryError::AlreadyExists) => {
                tracing::debug!(kind = T::KIND, name = %name, "Lost create race, re-reading");
                self.repo.get_by_name(&name).await?.ok_or_else(|| {
                    Error::Internal(format!("{} '{}' vanished after conflict", T::KIND, name))
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, id: i64) -> Result<T> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(T::KIND, id))
    }

    pub async fn list(&self, pagination: Pagination, query: Option<&str>) -> Result<Page<T>> {
        Ok(self.repo.list(pagination, query).await?)
    }

    /// Create a new entity; fails with `Conflict` when the name is taken
    pub async fn create(&self, raw_name: &str) -> Result<T> {
        let name = normalize_name(T::KIND, raw_name)?;

        if self.repo.get_by_name(&name).await?.is_some() {
            return Err(Error::Conflict(format!(
                "{} with name '{}' already exists",
                T::KIND,
                name
            )));
        }

        let created = self.repo.create(&T::with_name(name)).await?;
        tracing::info!(kind = T::KIND, id = ?created.id(), "Created named entity");
        Ok(created)
    }

    /// Rename an existing entity
    pub async fn update(&self, id: i64, raw_name: &str) -> Result<T> {
        let name = normalize_name(T::KIND, raw_name)?;
        let mut entity = self.get(id).await?;

        if let Some(other) = self.repo.get_by_name(&name).await? {
            if other.id() != Some(id) {
                return Err(Error::Conflict(format!(
                    "{} with name '{}' already exists",
                    T::KIND,
                    name
                )));
            }
        }

        entity.set_name(name);
        let updated = self.repo.update(&entity).await.map_err(|e| match e {
            RepositoryError::NotFound => Error::not_found(T::KIND, id),
            other => other.into(),
        })?;
        tracing::info!(kind = T::KIND, id, "Updated named entity");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<T> {
        let deleted = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| Error::not_found(T::KIND, id))?;
        tracing::info!(kind = T::KIND, id, "Deleted named entity");
        Ok(deleted)
    }
}
