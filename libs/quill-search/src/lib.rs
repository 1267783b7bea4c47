//! Dynamic search/filter/pagination engine for the Quill knowledge base.
//!
//! One engine serves every entity type in the system. Each entity registers an
//! [`EntitySchema`]: a closed whitelist of filterable field names, the rule for
//! turning each `(field, value)` term into a store-level predicate, the filter
//! combination mode, and a default sort column. The engine parses a flat filter
//! expression (`field=value` pairs joined by `#`), dispatches each term through
//! the whitelist, and assembles a pair of parameterized SQL statements (page
//! query + count query) plus their bind values.
//!
//! The crate deliberately has no database driver dependency: execution belongs
//! to the store layer. Everything here is pure and synchronous.

pub mod error;
pub mod fields;
pub mod page;
pub mod predicate;
pub mod query;
pub mod request;
pub mod terms;

pub use error::SearchError;
pub use fields::{EntitySchema, FieldRule, FilterMode};
pub use page::Page;
pub use predicate::{BindValue, Predicate};
pub use query::{assemble as assemble_query, SearchQuery};
pub use request::{PageRequest, SearchFilter, SearchRequest, SortDirection};
pub use terms::parse_terms;
