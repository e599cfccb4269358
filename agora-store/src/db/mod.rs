//! Database layer - connection pool, schema bootstrap, and repositories.
//!
//! # Design Principles
//!
//! - Pooled `SqlitePool` handle - no singleton, no `Arc<Mutex<Connection>>`
//! - Relationship traversals use JOINs - no N+1 queries
//! - Foreign keys are enforced by SQLite, not re-checked here

pub mod entity;
pub mod repos;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::StoreConfig;
use crate::error::Result;
use entity::Entity;
use repos::{FollowerRepo, QuestionLikeRepo, QuestionRepo, ReplyRepo, UserRepo};

/// SQLite-backed store for the question board.
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at the configured path, creating the file and its
    /// parent directory if missing, and apply the schema.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", config.path.display()))?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        // Idempotent CREATE TABLE IF NOT EXISTS bundle (multi-statement SQL)
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&pool).await?;

        tracing::info!(path = %config.path.display(), "question store ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert or update a record depending on whether it has an id yet.
    pub async fn save<E: Entity>(&self, record: &mut E) -> Result<()> {
        entity::save(&self.pool, record).await
    }

    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.pool)
    }

    pub fn questions(&self) -> QuestionRepo<'_> {
        QuestionRepo::new(&self.pool)
    }

    pub fn replies(&self) -> ReplyRepo<'_> {
        ReplyRepo::new(&self.pool)
    }

    pub fn followers(&self) -> FollowerRepo<'_> {
        FollowerRepo::new(&self.pool)
    }

    pub fn question_likes(&self) -> QuestionLikeRepo<'_> {
        QuestionLikeRepo::new(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::User;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::at(dir.path().join("test.db"));

        let store = Store::open(&config).await.unwrap();
        let users = store.users().all().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::at(dir.path().join("test.db"));

        let store = Store::open(&config).await.unwrap();
        let mut user = User::new("Andrew", "Larson");
        store.save(&mut user).await.unwrap();
        drop(store);

        // Second open re-applies the schema; existing rows must survive.
        let store = Store::open(&config).await.unwrap();
        let found = store.users().find_by_id(user.id.unwrap()).await.unwrap();
        assert_eq!(found.unwrap().fname, "Andrew");
    }

    #[tokio::test]
    async fn open_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::at(dir.path().join("nested/deeper/test.db"));

        Store::open(&config).await.unwrap();
        assert!(dir.path().join("nested/deeper/test.db").exists());
    }
}
