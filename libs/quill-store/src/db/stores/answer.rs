//! Answer store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Answer;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "answers",
    mode: FilterMode::All,
    default_sort: "created_at",
    fields: &[
        ("content", FieldRule::Contains { column: "content" }),
        (
            "isAccepted",
            FieldRule::EqualsBool {
                column: "is_accepted",
            },
        ),
        (
            "questionId",
            FieldRule::EqualsText {
                column: "question_id",
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
pub struct AnswerStore {
    pool: SqlitePool,
}

impl AnswerStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for AnswerStore {
    type Entity = Answer;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "answers", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Answer>> {
        let answer = sqlx::query_as::<_, Answer>("SELECT * FROM answers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(answer)
    }

    async fn create(&self, answer: &Answer) -> Result<()> {
        sqlx::query(
            "INSERT INTO answers (id, question_id, author_id, content, is_accepted, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&answer.id)
        .bind(&answer.question_id)
        .bind(&answer.author_id)
        .bind(&answer.content)
        .bind(answer.is_accepted)
        .bind(answer.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, answer: &Answer) -> Result<()> {
        let result = sqlx::query("UPDATE answers SET content = ?, is_accepted = ? WHERE id = ?")
            .bind(&answer.content)
            .bind(answer.is_accepted)
            .bind(&answer.id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "answer", &answer.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM answers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "answer", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Answer>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
