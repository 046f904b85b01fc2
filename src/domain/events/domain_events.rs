//! Domain events - Notifications of significant state changes
//!
//! Events are raised by command handlers after a write has been committed
//! and broadcast to whoever is listening. Nobody is required to listen.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::StoryId;

/// Base data for all events
#[derive(Debug, Clone)]
pub struct EventMetadata {
    /// Unique id of this occurrence
    pub event_id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }
}

/// All domain events in the system
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A new user story was stored
    UserStoryAdded {
        metadata: EventMetadata,
        story_id: StoryId,
        title: String,
    },
}

impl DomainEvent {
    pub fn user_story_added(story_id: StoryId, title: impl Into<String>) -> Self {
        DomainEvent::UserStoryAdded {
            metadata: EventMetadata::default(),
            story_id,
            title: title.into(),
        }
    }

    /// Get the metadata for this event
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            DomainEvent::UserStoryAdded { metadata, .. } => metadata,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::UserStoryAdded { .. } => "UserStoryAdded",
        }
    }
}
