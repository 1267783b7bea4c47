//! SQLite connection pool management and embedded migrations.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::Result;

pub mod stores;

/// Embedded schema migrations, applied on connect unless disabled.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Database connection pool wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the configured database and run migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let in_memory = config.is_in_memory();

        if !in_memory {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| anyhow::anyhow!("creating database directory: {e}"))?;
                }
            }
        }

        let connection_str = if in_memory {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}", config.path.display())
        };

        let options = SqliteConnectOptions::from_str(&connection_str)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            })
            .synchronous(SqliteSynchronous::Normal);

        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one and keep it open.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (config.max_connections, 0)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect_with(options)
            .await?;

        if config.auto_migrate {
            MIGRATOR.run(&pool).await?;
        }

        tracing::info!(
            path = %config.path.display(),
            max_connections,
            "database connected"
        );

        Ok(Self { pool })
    }

    /// An in-memory database with migrations applied. Used by tests and
    /// ephemeral tooling.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
