//! Services composing ownership repository calls

pub mod named;
pub mod ownerships;

use sqlx::PgPool;

use crate::domain::entities::{Owner, Role};
use crate::repository::{OwnerRepository, OwnershipRepositories, RoleRepository};

pub use named::NamedEntityService;
pub use ownerships::OwnershipService;

pub type OwnerService = NamedEntityService<Owner, OwnerRepository>;
pub type RoleService = NamedEntityService<Role, RoleRepository>;

/// All ownership-domain services over one pool
#[derive(Clone)]
pub struct OwnershipServices {
    pub owners: OwnerService,
    pub roles: RoleService,
    pub ownerships: OwnershipService,
}

impl OwnershipServices {
    pub fn new(pool: PgPool) -> Self {
        Self::from_repositories(OwnershipRepositories::new(pool))
    }

    pub fn from_repositories(repos: OwnershipRepositories) -> Self {
        let owners = OwnerService::new(repos.owners);
        let roles = RoleService::new(repos.roles);
        let ownerships = OwnershipService::new(repos.ownerships, owners.clone(), roles.clone());
        Self {
            owners,
            roles,
            ownerships,
        }
    }
}
