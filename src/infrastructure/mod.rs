//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory story stores
//! - HTTP: REST API routes and health check
//! - Event bus: in-process domain event fan-out
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod event_bus;
pub mod http;
pub mod persistence;
pub mod seed;
pub mod state;
