//! Error types for the store layer.

use quill_search::SearchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A rejected search request (unknown field, unparsable value, bad sort).
    /// Business-rule failure, distinct from [`Error::NotFound`] and from
    /// backend failures; never retried.
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether this error is a client-side rejection rather than a fault of
    /// the store or its backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Search(_) | Self::NotFound { .. })
    }
}
