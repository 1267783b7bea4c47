//! Workspace store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::Workspace;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "workspaces",
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
    ],
};

#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    pool: SqlitePool,
}

impl WorkspaceStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for WorkspaceStore {
    type Entity = Workspace;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "workspaces", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Workspace>> {
        let workspace = sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(workspace)
    }

    async fn create(&self, workspace: &Workspace) -> Result<()> {
        sqlx::query(
            "INSERT INTO workspaces (id, name, description, owner_id, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&workspace.id)
        .bind(&workspace.name)
        .bind(&workspace.description)
        .bind(&workspace.owner_id)
        .bind(workspace.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, workspace: &Workspace) -> Result<()> {
        let result = sqlx::query("UPDATE workspaces SET name = ?, description = ? WHERE id = ?")
            .bind(&workspace.name)
            .bind(&workspace.description)
            .bind(&workspace.id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "workspace", &workspace.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "workspace", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<Workspace>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
