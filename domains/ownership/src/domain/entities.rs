//! Domain entities for the ownership domain
//!
//! An ownership ties a data entity to an owner acting in a role.

use catalog_repository::{Table, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Entity identified to users by a unique, live name
pub trait NamedEntity: Table + Clone {
    /// Entity kind used in messages and logs
    const KIND: &'static str;

    fn with_name(name: String) -> Self;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

/// Owner entity - a person or team responsible for data entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Owner {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Owner {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl NamedEntity for Owner {
    const KIND: &'static str = "Owner";

    fn with_name(name: String) -> Self {
        Owner::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Table for Owner {
    const TABLE: &'static str = "owner";
    const NAME: Option<&'static str> = Some("name");
    const UPDATED_AT: Option<&'static str> = Some("updated_at");

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("is_deleted", Value::from(self.is_deleted)),
            ("deleted_at", Value::from(self.deleted_at)),
        ]
    }
}

/// Role entity - the capacity in which an owner owns a data entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl NamedEntity for Role {
    const KIND: &'static str = "Role";

    fn with_name(name: String) -> Self {
        Role::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Table for Role {
    const TABLE: &'static str = "role";
    const NAME: Option<&'static str> = Some("name");
    const UPDATED_AT: Option<&'static str> = Some("updated_at");

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("is_deleted", Value::from(self.is_deleted)),
            ("deleted_at", Value::from(self.deleted_at)),
        ]
    }
}

/// Ownership entity - association between data entity, owner and role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ownership {
    pub id: Option<i64>,
    pub data_entity_id: i64,
    pub owner_id: i64,
    pub role_id: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Ownership {
    pub fn new(data_entity_id: i64, owner_id: i64, role_id: i64) -> Self {
        Ownership {
            id: None,
            data_entity_id,
            owner_id,
            role_id,
            created_at: None,
        }
    }
}

impl Table for Ownership {
    const TABLE: &'static str = "ownership";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("data_entity_id", Value::from(self.data_entity_id)),
            ("owner_id", Value::from(self.owner_id)),
            ("role_id", Value::from(self.role_id)),
        ]
    }
}

/// Ownership with its owner and role resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipDto {
    pub ownership: Ownership,
    pub owner: Owner,
    pub role: Role,
}

/// Input for assigning an owner to a data entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OwnershipFormData {
    #[validate(length(min = 1, max = 255))]
    pub owner_name: String,
    #[validate(length(min = 1, max = 255))]
    pub role_name: String,
}

/// Input for changing the role of an existing ownership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OwnershipUpdateFormData {
    #[validate(length(min = 1, max = 255))]
    pub role_name: String,
}
