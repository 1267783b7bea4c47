//! One store per entity type.
//!
//! Each store owns a clone of the pool (explicit wiring, no ambient registry)
//! and declares a `SCHEMA` constant: its search whitelist, filter mode, and
//! default sort column. CRUD is thin plumbing; `search` delegates to the
//! shared engine and the [`fetch_page`] executor below.

use async_trait::async_trait;
use quill_search::{assemble_query, BindValue, EntitySchema, Page, SearchRequest};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, SqlitePool};

use crate::{Error, Result};

mod answer;
mod comment;
mod note;
mod project;
mod question;
mod tag;
mod user;
mod workspace;

pub use answer::AnswerStore;
pub use comment::CommentStore;
pub use note::NoteStore;
pub use project::ProjectStore;
pub use question::QuestionStore;
pub use tag::TagStore;
pub use user::UserStore;
pub use workspace::WorkspaceStore;

/// Uniform store surface shared by all entity types.
///
/// `search` is the engine's single entry point into the backing store; the
/// remaining methods are conventional CRUD co-located on the same interface.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Entity: Send;

    async fn exists(&self, id: &str) -> Result<bool>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Self::Entity>>;
    async fn create(&self, entity: &Self::Entity) -> Result<()>;
    /// Errors with `NotFound` when no row has the entity's id.
    async fn update(&self, entity: &Self::Entity) -> Result<()>;
    /// Errors with `NotFound` when no row has the given id.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
    /// Filtered, sorted, paginated search per the store's whitelist.
    async fn search(&self, request: &SearchRequest) -> Result<Page<Self::Entity>>;
}

/// Assemble and execute a search: count statement first, then the page
/// statement, wrapped into the pagination envelope. A rejected filter aborts
/// before either statement runs.
pub(crate) async fn fetch_page<T>(
    pool: &SqlitePool,
    schema: &EntitySchema,
    request: &SearchRequest,
) -> Result<Page<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let query = assemble_query(schema, request)?;
    tracing::debug!(table = schema.table, sql = %query.items_sql, "executing search");

    let mut count = sqlx::query_scalar::<_, i64>(&query.count_sql);
    for bind in query.binds.clone() {
        count = match bind {
            BindValue::Text(v) => count.bind(v),
            BindValue::Integer(v) => count.bind(v),
        };
    }
    let total = count.fetch_one(pool).await?;

    let mut items = sqlx::query_as::<_, T>(&query.items_sql);
    for bind in query.item_binds() {
        items = match bind {
            BindValue::Text(v) => items.bind(v),
            BindValue::Integer(v) => items.bind(v),
        };
    }
    let items = items.fetch_all(pool).await?;

    Ok(Page {
        page_number: query.page_number,
        page_size: query.page_size,
        total_elements: total.max(0) as u64,
        items,
    })
}

pub(crate) async fn exists_by_id(
    pool: &SqlitePool,
    table: &'static str,
    id: &str,
) -> Result<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(exists)
}

pub(crate) fn ensure_found(
    result: SqliteQueryResult,
    entity: &'static str,
    id: &str,
) -> Result<()> {
    if result.rows_affected() == 0 {
        return Err(Error::not_found(entity, id));
    }
    Ok(())
}
