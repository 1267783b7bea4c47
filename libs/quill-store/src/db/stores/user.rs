//! User store.

use async_trait::async_trait;
use quill_search::{EntitySchema, FieldRule, FilterMode, Page, SearchRequest};
use sqlx::SqlitePool;

use super::{ensure_found, exists_by_id, fetch_page, EntityStore};
use crate::models::User;
use crate::{Database, Result};

const SCHEMA: EntitySchema = EntitySchema {
    table: "users",
    mode: FilterMode::Any,
    default_sort: "display_name",
    fields: &[
        (
            "name",
            FieldRule::Contains {
                column: "display_name",
            },
        ),
        ("email", FieldRule::Contains { column: "email" }),
    ],
};

#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl EntityStore for UserStore {
    type Entity = User;

    async fn exists(&self, id: &str) -> Result<bool> {
        exists_by_id(&self.pool, "users", id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, display_name, email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let result = sqlx::query("UPDATE users SET display_name = ?, email = ? WHERE id = ?")
            .bind(&user.display_name)
            .bind(&user.email)
            .bind(&user.id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "user", &user.id)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_found(result, "user", id)
    }

    async fn search(&self, request: &SearchRequest) -> Result<Page<User>> {
        fetch_page(&self.pool, &SCHEMA, request).await
    }
}
