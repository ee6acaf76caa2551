//! Row descriptors consumed by the generic repositories

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::condition::Value;

/// Describes how an entity maps onto a relational table.
///
/// `values` lists every writable column except the id; it drives both
/// inserts and updates, so columns filled by database defaults
/// (`created_at`, serial ids) are left out.
pub trait Table: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const ID: &'static str = "id";
    /// Column matched by the text query of list operations
    const NAME: Option<&'static str> = None;
    /// Column stamped with the current time on every update
    const UPDATED_AT: Option<&'static str> = None;

    fn id(&self) -> Option<i64>;

    fn values(&self) -> Vec<(&'static str, Value)>;
}

/// Columns carrying the soft-delete marker of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftDeleteColumns {
    pub deleted: &'static str,
    pub deleted_at: Option<&'static str>,
}

impl SoftDeleteColumns {
    pub const DEFAULT: Self = Self {
        deleted: "is_deleted",
        deleted_at: Some("deleted_at"),
    };

    /// A table that only has the boolean marker
    pub const fn flag_only(deleted: &'static str) -> Self {
        Self {
            deleted,
            deleted_at: None,
        }
    }
}

impl Default for SoftDeleteColumns {
    fn default() -> Self {
        Self::DEFAULT
    }
}
