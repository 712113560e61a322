//! Repository Module
//!
//! CRUD operations for the relational menu tier. Records returned here
//! are shape-identical with the structured-file tier's records; the
//! JSON blob columns are (de)serialized transparently.

pub mod category;
pub mod menu_item;

pub use category::CategoryRepository;
pub use menu_item::MenuItemRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
