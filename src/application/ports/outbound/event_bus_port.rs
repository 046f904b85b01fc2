use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,
}

/// Broadcasts events to interested listeners
///
/// Publishing is fire-and-forget: success means the event was handed to the
/// bus, not that anyone received it.
#[async_trait]
pub trait EventBusPort<E>: Send + Sync {
    async fn publish(&self, event: E) -> Result<(), EventBusError>;
}
