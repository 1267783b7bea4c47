//! Project store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Project;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "projects",
    mode: FilterMode::All,
    default_sort: "name",
    fields: &[
        ("name", FieldRule::Contains { column: "name" }),
        (
            "description",
            FieldRule::Contains {
                column: "description",
            },
        ),
        (
            "workspaceId",
            FieldRule::EqualsText {
                column: "workspace_id",
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
pub struct ProjectStore {
    pool: SqlitePool,
}

impl ProjectStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for ProjectStore {
    type Entity = Project;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "projects", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn create(&self, project: &Project) -> Result<()> {
        sqlx::query(
            "INSERT INTO projects (id, workspace_id, author_id, name, description, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&project.id)
        .bind(&project.workspace_id)
        .bind(&project.author_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<()> {
        let result = sqlx::query("UPDATE projects SET name = ?, description = ? WHERE id = ?")
            .bind(&project.name)
            .bind(&project.description)
            .bind(&project.id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "project", &project.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "project", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Project>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
