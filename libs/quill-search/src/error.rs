//! Error types for the search engine.

use thiserror::Error;

/// Errors raised while turning a search request into an executable query.
///
/// Every variant is a client/business error: the request was rejected before
/// anything touched the backing store. Store failures are not represented here;
/// they surface from the executing layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The filter referenced a field that is not in the entity's whitelist.
    #[error("unknown search field: {field}")]
    UnknownField { field: String },

    /// A filter value failed to parse into the field's native type.
    #[error("invalid value '{value}' for search field '{field}'")]
    InvalidValue { field: String, value: String },

    /// The sort direction was neither blank, `asc`, nor `desc`.
    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),

    /// The sort field is unknown or does not map to a sortable column.
    #[error("unsupported sort field: {0}")]
    UnsupportedSortField(String),

    /// The requested page size was not a positive integer.
    #[error("invalid page size: {0}")]
    InvalidPageSize(u32),
}
