//! Persistence adapters
//!
//! This module implements the story repository port on top of SQLite
//! (sqlx) and an in-memory store, selected at startup.

mod memory_story_repository;
mod sqlite_story_repository;

pub use memory_story_repository::InMemoryStoryRepository;
pub use sqlite_story_repository::SqliteStoryRepository;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{RepositoryError, StoryRepositoryPort};
use crate::infrastructure::config::{AppConfig, StoreKind};

/// Open a sqlite pool
///
/// An in-memory database only lives as long as its connection, so those
/// pools are pinned to one connection that never expires.
pub async fn connect_sqlite(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
    }
}

/// The story store chosen by configuration
#[derive(Clone)]
pub enum StoryStore {
    Memory(Arc<InMemoryStoryRepository>),
    Sqlite(Arc<SqliteStoryRepository>),
}

impl StoryStore {
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        match config.store {
            StoreKind::Memory => Ok(StoryStore::Memory(Arc::new(InMemoryStoryRepository::new()))),
            StoreKind::Sqlite => {
                let pool = connect_sqlite(&config.database_url)
                    .await
                    .with_context(|| format!("Failed to open database {}", config.database_url))?;
                let repository = SqliteStoryRepository::new(pool)
                    .await
                    .context("Failed to create story tables")?;
                Ok(StoryStore::Sqlite(Arc::new(repository)))
            }
        }
    }

    pub fn repository(&self) -> Arc<dyn StoryRepositoryPort> {
        match self {
            StoryStore::Memory(repository) => repository.clone(),
            StoryStore::Sqlite(repository) => repository.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoryStore::Memory(_) => "memory",
            StoryStore::Sqlite(_) => "sqlite",
        }
    }

    /// Cheap liveness probe for the health endpoint
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            StoryStore::Memory(_) => Ok(()),
            StoryStore::Sqlite(repository) => sqlx::query("SELECT 1")
                .execute(repository.pool())
                .await
                .map(|_| ())
                .map_err(|e| RepositoryError::Database(e.to_string())),
        }
    }
}
