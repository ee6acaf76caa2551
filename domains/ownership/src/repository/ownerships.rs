//! Ownership repository

use catalog_repository::{delegate_crud, PgCrudRepository, RepoResult, Value};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Owner, Ownership, OwnershipDto, Role};

const OWNERSHIP_DTO_SELECT: &str = r#"
    SELECT o.id, o.data_entity_id, o.owner_id, o.role_id, o.created_at,
           ow.name AS owner_name, ow.created_at AS owner_created_at,
           ow.updated_at AS owner_updated_at, ow.is_deleted AS owner_is_deleted,
           ow.deleted_at AS owner_deleted_at,
           r.name AS role_name, r.created_at AS role_created_at,
           r.updated_at AS role_updated_at, r.is_deleted AS role_is_deleted,
           r.deleted_at AS role_deleted_at
    FROM ownership o
    INNER JOIN owner ow ON ow.id = o.owner_id
    INNER JOIN role r ON r.id = o.role_id
"#;

/// Ownership joined with owner and role columns
#[derive(Debug, sqlx::FromRow)]
struct OwnershipDtoRow {
    id: i64,
    data_entity_id: i64,
    owner_id: i64,
    role_id: i64,
    created_at: Option<DateTime<Utc>>,
    owner_name: String,
    owner_created_at: Option<DateTime<Utc>>,
    owner_updated_at: Option<DateTime<Utc>>,
    owner_is_deleted: bool,
    owner_deleted_at: Option<DateTime<Utc>>,
    role_name: String,
    role_created_at: Option<DateTime<Utc>>,
    role_updated_at: Option<DateTime<Utc>>,
    role_is_deleted: bool,
    role_deleted_at: Option<DateTime<Utc>>,
}

impl From<OwnershipDtoRow> for OwnershipDto {
    fn from(row: OwnershipDtoRow) -> Self {
        OwnershipDto {
            ownership: Ownership {
                id: Some(row.id),
                data_entity_id: row.data_entity_id,
                owner_id: row.owner_id,
                role_id: row.role_id,
                created_at: row.created_at,
            },
            owner: Owner {
                id: Some(row.owner_id),
                name: row.owner_name,
                created_at: row.owner_created_at,
                updated_at: row.owner_updated_at,
                is_deleted: row.owner_is_deleted,
                deleted_at: row.owner_deleted_at,
            },
            role: Role {
                id: Some(row.role_id),
                name: row.role_name,
                created_at: row.role_created_at,
                updated_at: row.role_updated_at,
                is_deleted: row.role_is_deleted,
                deleted_at: row.role_deleted_at,
            },
        }
    }
}

#[derive(Clone)]
pub struct OwnershipRepository {
    crud: PgCrudRepository<Ownership>,
}

impl OwnershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            crud: PgCrudRepository::new(pool),
        }
    }

    /// Ownership with owner and role resolved
    pub async fn get_dto(&self, ownership_id: i64) -> RepoResult<Option<OwnershipDto>> {
        let row = sqlx::query_as::<_, OwnershipDtoRow>(&format!(
            "{OWNERSHIP_DTO_SELECT} WHERE o.id = $1"
        ))
        .bind(ownership_id)
        .fetch_optional(self.crud.pool())
        .await?;

        Ok(row.map(OwnershipDto::from))
    }

    /// All ownerships of a data entity, oldest first
    pub async fn list_by_data_entity(&self, data_entity_id: i64) -> RepoResult<Vec<OwnershipDto>> {
        let rows = sqlx::query_as::<_, OwnershipDtoRow>(&format!(
            "{OWNERSHIP_DTO_SELECT} WHERE o.data_entity_id = $1 ORDER BY o.id"
        ))
        .bind(data_entity_id)
        .fetch_all(self.crud.pool())
        .await?;

        Ok(rows.into_iter().map(OwnershipDto::from).collect())
    }

    /// Point an ownership at another role
    pub async fn update_role(
        &self,
        ownership_id: i64,
        role_id: i64,
    ) -> RepoResult<Option<Ownership>> {
        self.crud
            .update_where(
                vec![("role_id", Value::from(role_id))],
                self.crud.id_condition(ownership_id),
            )
            .await
    }
}

delegate_crud!(OwnershipRepository, Ownership, crud);
