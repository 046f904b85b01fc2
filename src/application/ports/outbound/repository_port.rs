//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application handlers depend on these traits, not concrete implementations.

use async_trait::async_trait;

use crate::domain::aggregates::UserStory;
use crate::domain::value_objects::StoryId;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Story {0} is already persisted")]
    AlreadyPersisted(StoryId),
    /// A stored row no longer satisfies the domain's value-object rules
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

// =============================================================================
// Story Repository Port
// =============================================================================

/// Repository port for UserStory aggregate operations
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// Insert new stories together with their tasks
    ///
    /// Either every story is stored or none is. On success each story (and
    /// each of its tasks) carries its newly assigned, non-negative id.
    /// Stories that already have an id are rejected; this port never updates.
    async fn insert(&self, stories: &mut [UserStory]) -> Result<(), RepositoryError>;

    /// Get a story, with its tasks, by ID
    async fn find_by_id(&self, id: StoryId) -> Result<Option<UserStory>, RepositoryError>;

    /// List all stories in ascending id order
    async fn get_all(&self) -> Result<Vec<UserStory>, RepositoryError>;
}
