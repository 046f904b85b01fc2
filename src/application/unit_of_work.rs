//! Unit of work - per-request set of new aggregates committed together
//!
//! Handlers register new stories with [`StoryUnitOfWork::attach`] and commit
//! them with [`StoryUnitOfWork::save_changes`]. Attaching always means
//! "insert as new"; there is no merge or update path through here.

use std::sync::Arc;

use crate::application::ports::outbound::{RepositoryError, StoryRepositoryPort};
use crate::domain::aggregates::UserStory;
use crate::domain::value_objects::StoryId;

/// Handle to a story registered with a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attached(usize);

pub struct StoryUnitOfWork {
    repository: Arc<dyn StoryRepositoryPort>,
    tracked: Vec<UserStory>,
    /// `tracked[..saved]` has been committed
    saved: usize,
}

impl StoryUnitOfWork {
    pub fn new(repository: Arc<dyn StoryRepositoryPort>) -> Self {
        Self {
            repository,
            tracked: Vec::new(),
            saved: 0,
        }
    }

    /// Register a new story for insertion on the next save
    pub fn attach(&mut self, story: UserStory) -> Attached {
        self.tracked.push(story);
        Attached(self.tracked.len() - 1)
    }

    pub fn has_pending(&self) -> bool {
        self.saved < self.tracked.len()
    }

    /// Commit every pending attach, returning how many stories were written
    pub async fn save_changes(&mut self) -> Result<usize, RepositoryError> {
        if !self.has_pending() {
            return Ok(0);
        }
        self.repository
            .insert(&mut self.tracked[self.saved..])
            .await?;
        let written = self.tracked.len() - self.saved;
        self.saved = self.tracked.len();
        Ok(written)
    }

    /// The story behind `handle`, if it was attached to this unit of work
    pub fn story(&self, handle: Attached) -> Option<&UserStory> {
        self.tracked.get(handle.0)
    }

    /// The id assigned to an attached story, once it has been saved
    pub fn id_of(&self, handle: Attached) -> Option<StoryId> {
        self.story(handle).and_then(UserStory::id)
    }
}
