//! Question store, including tag-link maintenance.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Question;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "questions",
    mode: FilterMode::All,
    default_sort: "created_at",
    fields: &[
        ("title", FieldRule::Contains { column: "title" }),
        ("content", FieldRule::Contains { column: "content" }),
        (
            "status",
            FieldRule::EqualsEnum {
                column: "status",
                variants: &["OPEN", "ANSWERED", "CLOSED"],
            },
        ),
        (
            "projectId",
            FieldRule::EqualsText {
                column: "project_id",
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
        (
            "tagsId",
            FieldRule::MemberEquals {
                link_table: "question_tags",
                link_local: "question_id",
                link_foreign: "tag_id",
            },
        ),
        (
            "tagsName",
            FieldRule::MemberContains {
                link_table: "question_tags",
                link_local: "question_id",
                link_foreign: "tag_id",
                member_table: "tags",
                member_column: "name",
            },
        ),
    ],
};

#[derive(Debug, Clone)]
pub struct QuestionStore {
    pool: SqlitePool,
}

impl QuestionStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Attach a tag to a question. Already-linked pairs are a no-op.
    pub async fn add_tag(&self, question_id: &str, tag_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO question_tags (question_id, tag_id) VALUES (?, ?)",
        )
        .bind(question_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn remove_tag(&self, question_id: &str, tag_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM question_tags WHERE question_id = ? AND tag_id = ?")
            .bind(question_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EntityStore for QuestionStore {
    type Entity = Question;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "questions", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn create(&self, question: &Question) -> Result<()> {
        sqlx::query(
            "INSERT INTO questions (id, project_id, author_id, title, content, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&question.id)
        .bind(&question.project_id)
        .bind(&question.author_id)
        .bind(&question.title)
        .bind(&question.content)
        .bind(question.status)
        .bind(question.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, question: &Question) -> Result<()> {
        let result =
            sqlx::query("UPDATE questions SET title = ?, content = ?, status = ? WHERE id = ?")
                .bind(&question.title)
                .bind(&question.content)
                .bind(question.status)
                .bind(&question.id)
                .execute(&self.pool)
                .await?;
        ensure_found(result, "question", &question.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "question", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Question>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
