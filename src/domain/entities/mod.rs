//! Domain entities - Core business objects with identity

mod story_task;

pub use story_task::StoryTask;
