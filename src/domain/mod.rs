//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Value Objects: Priority, BusinessValue, Relevance, identifiers
//! - Entities: StoryTask
//! - Aggregates: UserStory aggregate root
//! - Domain Events: State changes and notifications

pub mod aggregates;
pub mod entities;
pub mod events;
pub mod value_objects;
