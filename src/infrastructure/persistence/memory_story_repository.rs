//! In-memory story repository
//!
//! Backs the `memory` store and the test suite. Ids are handed out from
//! counters starting at 1, mirroring sqlite's rowids.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{RepositoryError, StoryRepositoryPort};
use crate::domain::aggregates::UserStory;
use crate::domain::value_objects::{StoryId, TaskId};

#[derive(Default)]
struct MemoryStore {
    stories: Vec<UserStory>,
    last_story_id: i64,
    last_task_id: i64,
}

#[derive(Default)]
pub struct InMemoryStoryRepository {
    store: RwLock<MemoryStore>,
}

impl InMemoryStoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryRepositoryPort for InMemoryStoryRepository {
    async fn insert(&self, stories: &mut [UserStory]) -> Result<(), RepositoryError> {
        if let Some(id) = stories.iter().find_map(|s| s.id()) {
            return Err(RepositoryError::AlreadyPersisted(id));
        }

        let mut store = self.store.write().await;
        for story in stories.iter_mut() {
            store.last_story_id += 1;
            let story_id = StoryId::new(store.last_story_id);

            let mut task_ids = Vec::with_capacity(story.tasks().len());
            for _ in story.tasks() {
                store.last_task_id += 1;
                task_ids.push(TaskId::new(store.last_task_id));
            }

            story.mark_persisted(story_id, task_ids);
            store.stories.push(story.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> Result<Option<UserStory>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.stories.iter().find(|s| s.id() == Some(id)).cloned())
    }

    async fn get_all(&self) -> Result<Vec<UserStory>, RepositoryError> {
        Ok(self.store.read().await.stories.clone())
    }
}
