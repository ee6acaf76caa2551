//! Ownership service: assigns owners in roles to data entities

use catalog_common::{Error, Result};
use catalog_repository::CrudRepository;
use validator::Validate;

use crate::domain::entities::{Ownership, OwnershipDto, OwnershipFormData, OwnershipUpdateFormData};
use crate::repository::OwnershipRepository;
use crate::service::{OwnerService, RoleService};

#[derive(Clone)]
pub struct OwnershipService {
    ownerships: OwnershipRepository,
    owners: OwnerService,
    roles: RoleService,
}

impl OwnershipService {
    pub fn new(ownerships: OwnershipRepository, owners: OwnerService, roles: RoleService) -> Self {
        Self {
            ownerships,
            owners,
            roles,
        }
    }

    /// Attach an owner in a role to a data entity, creating either by name
    /// if they do not exist yet
    pub async fn create(&self, data_entity_id: i64, form: OwnershipFormData) -> Result<OwnershipDto> {
        form.validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        let (owner, role) = tokio::try_join!(
            self.owners.get_or_create(&form.owner_name),
            self.roles.get_or_create(&form.role_name),
        )?;

        let owner_id = owner
            .id
            .ok_or_else(|| Error::Internal("Owner was returned without an id".to_string()))?;
        let role_id = role
            .id
            .ok_or_else(|| Error::Internal("Role was returned without an id".to_string()))?;

        let ownership = self
            .ownerships
            .create(&Ownership::new(data_entity_id, owner_id, role_id))
            .await?;

        tracing::info!(
            ownership_id = ?ownership.id,
            data_entity_id,
            owner = %owner.name,
            role = %role.name,
            "Created ownership"
        );

        Ok(OwnershipDto {
            ownership,
            owner,
            role,
        })
    }

    /// Remove an ownership; a missing one is not an error
    pub async fn delete(&self, ownership_id: i64) -> Result<()> {
        if self.ownerships.delete(ownership_id).await?.is_some() {
            tracing::info!(ownership_id, "Deleted ownership");
        }
        Ok(())
    }

    /// Move an ownership to another role, creating the role if needed
    pub async fn update(
        &self,
        ownership_id: i64,
        form: OwnershipUpdateFormData,
    ) -> Result<OwnershipDto> {
        form.validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        if self.ownerships.get(ownership_id).await?.is_none() {
            return Err(Error::not_found("Ownership", ownership_id));
        }

        let role = self.roles.get_or_create(&form.role_name).await?;
        let role_id = role
            .id
            .ok_or_else(|| Error::Internal("Role was returned without an id".to_string()))?;

        self.ownerships
            .update_role(ownership_id, role_id)
            .await?
            .ok_or_else(|| Error::not_found("Ownership", ownership_id))?;

        tracing::info!(ownership_id, role = %role.name, "Updated ownership role");

        self.ownerships
            .get_dto(ownership_id)
            .await?
            .ok_or_else(|| Error::not_found("Ownership", ownership_id))
    }

    /// Ownerships of a data entity with owners and roles resolved
    pub async fn list(&self, data_entity_id: i64) -> Result<Vec<OwnershipDto>> {
        Ok(self.ownerships.list_by_data_entity(data_entity_id).await?)
    }
}
