//! Comment store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Comment;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "comments",
    mode: FilterMode::All,
    default_sort: "created_at",
    fields: &[
        ("content", FieldRule::Contains { column: "content" }),
        (
            "targetType",
            FieldRule::EqualsEnum {
                column: "target_type",
                variants: &["QUESTION", "ANSWER", "NOTE"],
            },
        ),
        (
            "targetId",
            FieldRule::EqualsText {
                column: "target_id",
            },
        ),
        (
            "authorId",
            FieldRule::EqualsText {
                column: "author_id",
            },
        ),
        (
            "authorName",
            FieldRule::RelatedContains {
                related_table: "users",
                related_key: "id",
                local_key: "author_id",
                column: "display_name",
            },
        ),
    ],
};

#[derive(Debug, Clone)]
pub struct CommentStore {
    pool: SqlitePool,
}

impl CommentStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for CommentStore {
    type Entity = Comment;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "comments", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn create(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, target_type, target_id, author_id, content, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&comment.id)
        .bind(comment.target_type)
        .bind(&comment.target_id)
        .bind(&comment.author_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        let result = sqlx::query("UPDATE comments SET content = ? WHERE id = ?")
            .bind(&comment.content)
            .bind(&comment.id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "comment", &comment.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "comment", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Comment>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
