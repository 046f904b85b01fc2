//! Domain events raised when stories change

pub mod domain_events;

pub use domain_events::DomainEvent;
