//! Search request types: pagination, sorting, and the filter input.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SearchError;
use crate::terms::parse_terms;

/// Default page size when the request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort direction for the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a direction string, case-insensitively.
    ///
    /// A blank string means "unspecified" and falls back to ascending; any
    /// other value that is not `asc`/`desc` is a client error.
    pub fn parse(value: &str) -> Result<Self, SearchError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(SearchError::InvalidSortDirection(value.to_string())),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Page geometry and sort specification for a search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    /// Zero-based page index.
    pub number: u32,
    /// Items per page; must be positive.
    pub size: u32,
    /// Whitelisted field to sort by; the entity's default column when absent.
    pub sort_field: Option<String>,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_field: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number,
            size,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.direction = direction;
        self
    }
}

/// Filter criteria attached to a search request.
///
/// Two mutually exclusive representations exist: the raw `#`/`=` expression
/// used by free-text callers, and a pre-built field map used by typed callers.
/// Both are request-scoped and never persisted.
#[derive(Debug, Clone, Default)]
pub enum SearchFilter {
    /// No filter: every row matches.
    #[default]
    None,
    /// Raw filter expression, parsed with [`parse_terms`].
    Expression(String),
    /// Pre-built field-to-value map.
    Fields(BTreeMap<String, String>),
}

/// A complete search request: page geometry plus filter criteria.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub page: PageRequest,
    pub filter: SearchFilter,
}

impl SearchRequest {
    pub fn new(page: PageRequest, filter: SearchFilter) -> Self {
        Self { page, filter }
    }

    /// A request with default paging and the given raw filter expression.
    pub fn with_expression(expression: impl Into<String>) -> Self {
        Self {
            page: PageRequest::default(),
            filter: SearchFilter::Expression(expression.into()),
        }
    }

    /// Resolve the filter into a term map.
    ///
    /// Pre-built field maps get the same normalization as parsed expressions:
    /// keys and values are trimmed and entries with an empty side are dropped,
    /// so both input paths uphold the term-map invariants.
    pub fn terms(&self) -> BTreeMap<String, String> {
        match &self.filter {
            SearchFilter::None => BTreeMap::new(),
            SearchFilter::Expression(expr) => parse_terms(expr),
            SearchFilter::Fields(fields) => fields
                .iter()
                .filter_map(|(k, v)| {
                    let k = k.trim();
                    let v = v.trim();
                    (!k.is_empty() && !v.is_empty())
                        .then(|| (k.to_string(), v.to_string()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!(SortDirection::parse("ASC"), Ok(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("desc"), Ok(SortDirection::Descending));
        assert_eq!(SortDirection::parse("DeSc"), Ok(SortDirection::Descending));
    }

    #[test]
    fn blank_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse(""), Ok(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("   "), Ok(SortDirection::Ascending));
    }

    #[test]
    fn invalid_direction_is_a_client_error() {
        assert_eq!(
            SortDirection::parse("sideways"),
            Err(SearchError::InvalidSortDirection("sideways".to_string()))
        );
    }

    #[test]
    fn page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.number, 0);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
        assert!(page.sort_field.is_none());
        assert_eq!(page.direction, SortDirection::Ascending);
    }

    #[test]
    fn expression_filter_is_parsed_into_terms() {
        let request = SearchRequest::with_expression("a=1#b=2");
        let terms = request.terms();
        assert_eq!(terms.get("a").map(String::as_str), Some("1"));
        assert_eq!(terms.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn field_map_filter_is_normalized() {
        let mut fields = BTreeMap::new();
        fields.insert(" title ".to_string(), " rust ".to_string());
        fields.insert("empty".to_string(), "   ".to_string());
        let request = SearchRequest::new(PageRequest::default(), SearchFilter::Fields(fields));
        let terms = request.terms();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms.get("title").map(String::as_str), Some("rust"));
    }

    #[test]
    fn no_filter_yields_no_terms() {
        assert!(SearchRequest::default().terms().is_empty());
    }
}
