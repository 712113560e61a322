//! Storage Tiers
//!
//! The content of the site persists in one of three places, chosen at
//! runtime: the relational adapter (see [`crate::db`]), the
//! structured-file store (source-shaped text, [`source_file`]) or the
//! flat-JSON store ([`json_file`]). The codec that round-trips values
//! through the source-shaped text lives in [`codec`]; id and order
//! assignment for list-valued collections in [`ids`]; the compiled-in
//! fallback dataset in [`defaults`].

pub mod codec;
pub mod defaults;
pub mod ids;
pub mod json_file;
pub mod source_file;

pub use json_file::JsonFileStore;
pub use source_file::{LogicalFile, SourceFileStore, MENU_FILE, RESTAURANT_FILE};

use thiserror::Error;

/// Storage-tier error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// The preferred tier has no connection info
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Whether this error is a tier failure (eligible for fallback) as
    /// opposed to a domain error that must surface unchanged.
    pub fn is_tier_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Database(_) | StoreError::Io(_) | StoreError::NotConfigured(_)
        )
    }
}

impl From<crate::db::repository::RepoError> for StoreError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match err {
            RepoError::NotFound(msg) => StoreError::NotFound(msg),
            RepoError::Duplicate(msg) => StoreError::Conflict(msg),
            RepoError::Database(msg) => StoreError::Database(msg),
        }
    }
}
