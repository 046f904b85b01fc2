//! Request handlers - one per command or query
//!
//! Each module holds the request type, its bound validator and its handler.

pub mod create_story;
pub mod get_all_stories;
pub mod get_story;

pub use create_story::{
    create_story_validator, CreateStoryCommand, CreateStoryCommandHandler, PriorityPolicy,
};
pub use get_all_stories::{get_all_stories_validator, GetAllStoriesQuery, GetAllStoriesQueryHandler};
pub use get_story::{get_story_validator, GetStoryQuery, GetStoryQueryHandler};
