//! In-process domain event bus
//!
//! Events fan out over a tokio broadcast channel. Every subscriber gets its
//! own copy; a subscriber that falls more than `capacity` events behind
//! loses the oldest ones and is told how many it missed.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::application::ports::outbound::{EventBusError, EventBusPort};
use crate::domain::events::DomainEvent;

pub struct BroadcastEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventBusPort<DomainEvent> for BroadcastEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError> {
        // No subscribers is not an error; the event is simply dropped
        if self.sender.send(event).is_err() {
            tracing::debug!("Published event with no subscribers");
        }
        Ok(())
    }
}

/// Log every domain event until the bus goes away
///
/// This should be spawned as a background task
pub async fn run_event_logger(mut receiver: broadcast::Receiver<DomainEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => match &event {
                DomainEvent::UserStoryAdded { story_id, title, .. } => {
                    info!(
                        event_id = %event.metadata().event_id,
                        occurred_at = %event.metadata().timestamp.to_rfc3339(),
                        story_id = %story_id,
                        "{}: {}",
                        event.event_type(),
                        title
                    );
                }
            },
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!("Event logger fell behind, {} events skipped", missed);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    info!("Event logger shutting down");
}
