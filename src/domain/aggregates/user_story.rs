//! User Story Aggregate - The root aggregate for a story and its tasks
//!
//! A story owns its tasks outright. Tasks are only ever appended through
//! [`UserStory::add_task`]; the collection is never swapped out.

use crate::domain::entities::StoryTask;
use crate::domain::value_objects::{BusinessValue, Priority, StoryId, TaskId};

/// The User Story Aggregate Root
#[derive(Debug, Clone, PartialEq)]
pub struct UserStory {
    /// Assigned by persistence on first save
    id: Option<StoryId>,
    title: String,
    priority: Priority,
    text: String,
    long_text: String,
    business_value: BusinessValue,
    /// Tasks in insertion order
    tasks: Vec<StoryTask>,
}

impl UserStory {
    /// Create a new, not yet persisted story
    ///
    /// Title emptiness is a request rule, checked by the create-story
    /// validator before a story is ever built.
    pub fn new(
        title: impl Into<String>,
        priority: Priority,
        text: impl Into<String>,
        long_text: impl Into<String>,
        business_value: BusinessValue,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            priority,
            text: text.into(),
            long_text: long_text.into(),
            business_value,
            tasks: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> Option<StoryId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn long_text(&self) -> &str {
        &self.long_text
    }

    pub fn business_value(&self) -> BusinessValue {
        self.business_value
    }

    pub fn tasks(&self) -> &[StoryTask] {
        &self.tasks
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Append a task to the story
    pub fn add_task(&mut self, task: StoryTask) {
        self.tasks.push(task);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Rebuild a stored story (for hydration from persistence)
    pub fn with_id(mut self, id: StoryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Record the keys the store handed out for this story and its tasks
    ///
    /// `task_ids` is matched to tasks positionally.
    pub(crate) fn mark_persisted(&mut self, id: StoryId, task_ids: Vec<TaskId>) {
        debug_assert_eq!(task_ids.len(), self.tasks.len());
        self.id = Some(id);
        for (task, task_id) in self.tasks.iter_mut().zip(task_ids) {
            task.assign_id(task_id);
        }
    }
}
