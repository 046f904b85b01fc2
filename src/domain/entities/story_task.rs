//! Story task entity - A unit of work belonging to a user story

use crate::domain::value_objects::TaskId;

/// A task owned by exactly one [`UserStory`](crate::domain::aggregates::UserStory)
///
/// Tasks have no lifecycle of their own: they are attached through the
/// story and removed when the story is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryTask {
    /// Assigned by persistence on first save
    id: Option<TaskId>,
    description: String,
}

impl StoryTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }

    /// Rebuild a stored task (for hydration from persistence)
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn assign_id(&mut self, id: TaskId) {
        self.id = Some(id);
    }
}
