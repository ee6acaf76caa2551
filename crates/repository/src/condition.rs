//! Bind values and SQL predicates rendered into a `QueryBuilder`

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

/// A nullable, typed value bound as a query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i64>),
    Text(Option<String>),
    Bool(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Int(v) => v.is_none(),
            Value::Text(v) => v.is_none(),
            Value::Bool(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    pub(crate) fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Value::Int(v) => {
                builder.push_bind(v);
            }
            Value::Text(v) => {
                builder.push_bind(v);
            }
            Value::Bool(v) => {
                builder.push_bind(v);
            }
            Value::Timestamp(v) => {
                builder.push_bind(v);
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(Some(v))
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(Some(v))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        Value::Timestamp(v)
    }
}

/// A predicate over a single column
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = value`, or `column IS NULL` for a null value
    Eq(&'static str, Value),
    /// `column = FALSE`
    IsFalse(&'static str),
    /// `column ILIKE '%needle%'` with LIKE wildcards in the needle escaped
    ContainsIgnoreCase(&'static str, String),
    /// `column = ANY(ids)`
    AnyOf(&'static str, Vec<i64>),
}

impl Condition {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Condition::Eq(column, value.into())
    }

    pub(crate) fn push(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Condition::Eq(column, value) if value.is_null() => {
                builder.push(column).push(" IS NULL");
            }
            Condition::Eq(column, value) => {
                builder.push(column).push(" = ");
                value.push_bind(builder);
            }
            Condition::IsFalse(column) => {
                builder.push(column).push(" = FALSE");
            }
            Condition::ContainsIgnoreCase(column, needle) => {
                builder
                    .push(column)
                    .push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(&needle)));
            }
            Condition::AnyOf(column, ids) => {
                builder.push(column).push(" = ANY(").push_bind(ids).push(")");
            }
        }
    }
}

/// Append `WHERE a AND b AND ...`; nothing for an empty list.
pub(crate) fn push_where(builder: &mut QueryBuilder<'_, Postgres>, conditions: Vec<Condition>) {
    for (i, condition) in conditions.into_iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        condition.push(builder);
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
