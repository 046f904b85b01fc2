//! Aggregates - Cluster of domain objects treated as a single unit

pub mod user_story;

pub use user_story::UserStory;
