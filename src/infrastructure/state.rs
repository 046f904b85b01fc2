//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::pipeline::Dispatcher;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::event_bus::BroadcastEventBus;
use crate::infrastructure::persistence::StoryStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Story store selected by `TUSK_STORE`
    pub store: StoryStore,
    pub event_bus: Arc<BroadcastEventBus>,
    pub dispatcher: Dispatcher,
    /// Cancelled on shutdown; requests run on child tokens
    pub shutdown: CancellationToken,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = StoryStore::from_config(&config).await?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: AppConfig, store: StoryStore) -> Self {
        let event_bus = Arc::new(BroadcastEventBus::new(config.event_bus_capacity));

        let dispatcher = Dispatcher::new(
            store.repository(),
            event_bus.clone(),
            config.priority_policy,
        );

        Self {
            config,
            store,
            event_bus,
            dispatcher,
            shutdown: CancellationToken::new(),
        }
    }
}
