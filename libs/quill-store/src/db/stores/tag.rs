//! Tag store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Tag;
use crate::{Database, Result};

/// Free-text whitelist: any filtered field containing its value matches.
const SCHEMA: EntitySchema = EntitySchema {
    table: "tags",
    mode: FilterMode::Any,
    default_sort: "name",
    fields: &[
        ("name", FieldRule::Contains { column: "name" }),
        (
            "description",
            FieldRule::Contains {
                column: "description",
            },
        ),
        ("category", FieldRule::Contains { column: "category" }),
        ("color", FieldRule::Contains { column: "color" }),
    ],
};

#[derive(Debug, Clone)]
pub struct TagStore {
    pool: SqlitePool,
}

impl TagStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for TagStore {
    type Entity = Tag;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "tags", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tag)
    }

    async fn create(&self, tag: &Tag) -> Result<()> {
        sqlx::query(
            "INSERT INTO tags (id, name, description, category, color, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&tag.id)
        .bind(&tag.name)
        .bind(&tag.description)
        .bind(&tag.category)
        .bind(&tag.color)
        .bind(tag.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, tag: &Tag) -> Result<()> {
        let result = sqlx::query(
            "UPDATE tags SET name = ?, description = ?, category = ?, color = ? WHERE id = ?",
        )
        .bind(&tag.name)
        .bind(&tag.description)
        .bind(&tag.category)
        .bind(&tag.color)
        .bind(&tag.id)
        .execute(&self.pool)
        .await?;
        ensure_found(result, "tag", &tag.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "tag", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Tag>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
