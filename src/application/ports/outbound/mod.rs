//! Outbound ports - Interfaces that the application requires from external systems

mod event_bus_port;
mod repository_port;

pub use event_bus_port::{EventBusError, EventBusPort};
pub use repository_port::{RepositoryError, StoryRepositoryPort};
