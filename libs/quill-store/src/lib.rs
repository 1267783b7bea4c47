//! Entity stores and SQLite persistence for the Quill knowledge base.
//!
//! One store per entity type (tags, users, workspaces, projects, questions,
//! answers, notes, comments), each exposing plain CRUD plus a `search`
//! operation backed by the shared `quill-search` engine. Every store declares
//! its own field whitelist and filter mode; the engine and the executing
//! helper in [`db::stores`] are common to all of them.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig};
pub use db::Database;
pub use error::{Error, Result};

// Request/response types callers need alongside the stores.
pub use quill_search::{
    Page, PageRequest, SearchError, SearchFilter, SearchRequest, SortDirection,
};
