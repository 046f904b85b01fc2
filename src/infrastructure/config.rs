//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::application::handlers::PriorityPolicy;

/// Which story store backs the repository port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(anyhow::anyhow!("Invalid store: {}", s)),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Story store backend
    pub store: StoreKind,
    /// SQLite connection URL (ignored by the memory store)
    pub database_url: String,

    /// HTTP server port
    pub server_port: u16,
    /// Single allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,

    /// How new stories get their priority
    pub priority_policy: PriorityPolicy,
    /// Insert the demo story into an empty store at startup
    pub seed_demo_data: bool,
    /// Buffered domain events per subscriber
    pub event_bus_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::Sqlite,
            database_url: "sqlite::memory:".to_string(),
            server_port: 3000,
            cors_allowed_origin: None,
            priority_policy: PriorityPolicy::default(),
            seed_demo_data: false,
            event_bus_capacity: 256,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            store: match lookup("TUSK_STORE") {
                Some(v) => v.parse().context("TUSK_STORE must be 'sqlite' or 'memory'")?,
                None => defaults.store,
            },
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),

            server_port: match lookup("SERVER_PORT") {
                Some(v) => v.parse().context("SERVER_PORT must be a valid port number")?,
                None => defaults.server_port,
            },
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()),

            priority_policy: match lookup("TUSK_PRIORITY_POLICY") {
                Some(v) => v
                    .parse()
                    .context("TUSK_PRIORITY_POLICY must be 'importance' or 'fixed:<rank>'")?,
                None => defaults.priority_policy,
            },
            seed_demo_data: match lookup("TUSK_SEED_DEMO_DATA") {
                Some(v) => v
                    .parse()
                    .context("TUSK_SEED_DEMO_DATA must be 'true' or 'false'")?,
                None => defaults.seed_demo_data,
            },
            event_bus_capacity: match lookup("EVENT_BUS_CAPACITY") {
                Some(v) => v
                    .parse()
                    .ok()
                    .filter(|c| *c > 0)
                    .context("EVENT_BUS_CAPACITY must be a positive integer")?,
                None => defaults.event_bus_capacity,
            },
        })
    }
}
