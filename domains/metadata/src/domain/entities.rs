//! Domain entities for the metadata domain
//!
//! Data entities are the catalogued assets; metadata fields are the keys
//! that can be attached to them and metadata field values hold the
//! per-entity value of a key.

use std::fmt;
use std::str::FromStr;

use catalog_common::Error;
use catalog_repository::{Table, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value type of a metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataType {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Json,
    Array,
}

impl MetadataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataType::String => "STRING",
            MetadataType::Integer => "INTEGER",
            MetadataType::Float => "FLOAT",
            MetadataType::Boolean => "BOOLEAN",
            MetadataType::Datetime => "DATETIME",
            MetadataType::Json => "JSON",
            MetadataType::Array => "ARRAY",
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STRING" => Ok(MetadataType::String),
            "INTEGER" => Ok(MetadataType::Integer),
            "FLOAT" => Ok(MetadataType::Float),
            "BOOLEAN" => Ok(MetadataType::Boolean),
            "DATETIME" => Ok(MetadataType::Datetime),
            "JSON" => Ok(MetadataType::Json),
            "ARRAY" => Ok(MetadataType::Array),
            other => Err(Error::Validation(format!(
                "Unknown metadata type: {}",
                other
            ))),
        }
    }
}

/// Where a metadata field was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataOrigin {
    /// Reported by an ingestion adapter
    External,
    /// Created by a catalog user
    Internal,
}

impl MetadataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataOrigin::External => "EXTERNAL",
            MetadataOrigin::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for MetadataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataOrigin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXTERNAL" => Ok(MetadataOrigin::External),
            "INTERNAL" => Ok(MetadataOrigin::Internal),
            other => Err(Error::Validation(format!(
                "Unknown metadata origin: {}",
                other
            ))),
        }
    }
}

/// Data entity row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataEntity {
    pub id: Option<i64>,
    pub oddrn: Option<String>,
    pub internal_name: Option<String>,
    pub external_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl DataEntity {
    pub fn new(oddrn: impl Into<String>, external_name: impl Into<String>) -> Self {
        DataEntity {
            oddrn: Some(oddrn.into()),
            external_name: Some(external_name.into()),
            ..Default::default()
        }
    }
}

impl Table for DataEntity {
    const TABLE: &'static str = "data_entity";
    const NAME: Option<&'static str> = Some("external_name");
    const UPDATED_AT: Option<&'static str> = Some("updated_at");

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("oddrn", Value::from(self.oddrn.clone())),
            ("internal_name", Value::from(self.internal_name.clone())),
            ("external_name", Value::from(self.external_name.clone())),
            ("is_deleted", Value::from(self.is_deleted)),
            ("deleted_at", Value::from(self.deleted_at)),
        ]
    }
}

/// Metadata field (key) row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MetadataField {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub origin: Option<String>,
    pub is_deleted: bool,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, field_type: MetadataType, origin: MetadataOrigin) -> Self {
        MetadataField {
            id: None,
            name: Some(name.into()),
            field_type: Some(field_type.to_string()),
            origin: Some(origin.to_string()),
            is_deleted: false,
        }
    }
}

impl Table for MetadataField {
    const TABLE: &'static str = "metadata_field";
    const NAME: Option<&'static str> = Some("name");

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("type", Value::from(self.field_type.clone())),
            ("origin", Value::from(self.origin.clone())),
            ("is_deleted", Value::from(self.is_deleted)),
        ]
    }
}

/// Lookup key of a metadata field: its name and value type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataKey {
    pub name: String,
    pub field_type: MetadataType,
}

impl MetadataKey {
    pub fn new(name: impl Into<String>, field_type: MetadataType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Value of one metadata field on one data entity.
///
/// Keyed by `(data_entity_id, metadata_field_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MetadataFieldValue {
    pub data_entity_id: i64,
    pub metadata_field_id: i64,
    pub value: Option<String>,
    pub active: bool,
}

impl MetadataFieldValue {
    pub fn new(data_entity_id: i64, metadata_field_id: i64, value: impl Into<String>) -> Self {
        MetadataFieldValue {
            data_entity_id,
            metadata_field_id,
            value: Some(value.into()),
            active: true,
        }
    }
}

/// A metadata value together with the field it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDto {
    pub metadata_field: MetadataField,
    pub metadata_field_value: MetadataFieldValue,
}
