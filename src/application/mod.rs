//! Application layer - Use cases on top of the domain
//!
//! This layer contains:
//! - Handlers: one per command or query
//! - Validation: rule sets bound to each request
//! - Pipeline: validate-then-execute dispatch
//! - Ports: traits infrastructure implements (repository, event bus)
//! - DTOs: read-side projections for the transport layer

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod pipeline;
pub mod ports;
pub mod unit_of_work;
pub mod validation;
