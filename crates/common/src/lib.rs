//! Shared utilities, configuration, and error handling for the data catalog
//!
//! This crate provides common functionality used across the catalog crates:
//! - Configuration management following 12-factor principles
//! - Error types and repository error classification
//! - Connection pool and tracing setup
//! - Pagination types

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod page;

pub use config::Config;
pub use db::{RepoResult, RepositoryError};
pub use error::{Error, Result};
pub use page::{Page, Pagination};
