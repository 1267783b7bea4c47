//! Note store, including tag-link maintenance.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Note;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "notes",
    mode: FilterMode::All,
    default_sort: "created_at",
    fields: &[
        ("title", FieldRule::Contains { column: "title" }),
        ("content", FieldRule::Contains { column: "content" }),
        ("version", FieldRule::EqualsInteger { column: "version" }),
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
                link_table: "note_tags",
                link_local: "note_id",
                link_foreign: "tag_id",
            },
        ),
        (
            "tagsName",
            FieldRule::MemberContains {
                link_table: "note_tags",
                link_local: "note_id",
                link_foreign: "tag_id",
                member_table: "tags",
                member_column: "name",
            },
        ),
    ],
};

#[derive(Debug, Clone)]
pub struct NoteStore {
    pool: SqlitePool,
}

impl NoteStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Attach a tag to a note. Already-linked pairs are a no-op.
    pub async fn add_tag(&self, note_id: &str, tag_id: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?, ?)")
            .bind(note_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn remove_tag(&self, note_id: &str, tag_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM note_tags WHERE note_id = ? AND tag_id = ?")
            .bind(note_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EntityStore for NoteStore {
    type Entity = Note;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "notes", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    async fn create(&self, note: &Note) -> Result<()> {
        sqlx::query(
            "INSERT INTO notes (id, project_id, author_id, title, content, version, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&note.id)
        .bind(&note.project_id)
        .bind(&note.author_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.version)
        .bind(note.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, note: &Note) -> Result<()> {
        let result =
            sqlx::query("UPDATE notes SET title = ?, content = ?, version = ? WHERE id = ?")
                .bind(&note.title)
                .bind(&note.content)
                .bind(note.version)
                .bind(&note.id)
                .execute(&self.pool)
                .await?;
        ensure_found(result, "note", &note.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "note", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Note>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
