//! Pagination types shared by list operations

use serde::{Deserialize, Serialize};

/// Default page size for list operations
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum page size for list operations
pub const MAX_PAGE_SIZE: u32 = 100;

/// A 1-based page request.
///
/// Only built through [`Pagination::new`], which raises `page` to at least 1
/// and clamps `size` to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    size: u32,
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip before the first row of this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)).saturating_mul(i64::from(self.size))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results with the total row count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: Pagination) -> Self {
        let has_next = pagination.offset().saturating_add(data.len() as i64) < total;
        Self {
            data,
            total,
            has_next,
        }
    }

    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            has_next: false,
        }
    }
}
