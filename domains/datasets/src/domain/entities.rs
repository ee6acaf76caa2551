//! Domain entities for the dataset domain
//!
//! Every ingestion of a dataset with a changed schema produces a new
//! [`DatasetVersion`]; the fields belonging to a version are linked through
//! the `dataset_structure` table.

use catalog_repository::{Table, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One version of a dataset's schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DatasetVersion {
    pub id: Option<i64>,
    pub dataset_oddrn: String,
    pub version_hash: String,
    pub version: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl DatasetVersion {
    pub fn new(dataset_oddrn: impl Into<String>, version_hash: impl Into<String>, version: i64) -> Self {
        DatasetVersion {
            id: None,
            dataset_oddrn: dataset_oddrn.into(),
            version_hash: version_hash.into(),
            version,
            created_at: None,
        }
    }
}

impl Table for DatasetVersion {
    const TABLE: &'static str = "dataset_version";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("dataset_oddrn", Value::from(self.dataset_oddrn.clone())),
            ("version_hash", Value::from(self.version_hash.clone())),
            ("version", Value::from(self.version)),
        ]
    }
}

/// A column of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DatasetField {
    pub id: Option<i64>,
    pub name: String,
    pub oddrn: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub is_primary_key: bool,
    pub is_nullable: bool,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl DatasetField {
    pub fn new(name: impl Into<String>, oddrn: impl Into<String>) -> Self {
        DatasetField {
            name: name.into(),
            oddrn: oddrn.into(),
            is_nullable: true,
            ..Default::default()
        }
    }
}

impl Table for DatasetField {
    const TABLE: &'static str = "dataset_field";
    const NAME: Option<&'static str> = Some("name");

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("oddrn", Value::from(self.oddrn.clone())),
            ("type", Value::from(self.field_type.clone())),
            ("is_primary_key", Value::from(self.is_primary_key)),
            ("is_nullable", Value::from(self.is_nullable)),
            ("description", Value::from(self.description.clone())),
        ]
    }
}

/// A dataset version together with its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStructure {
    pub dataset_version: DatasetVersion,
    pub fields: Vec<DatasetField>,
}
