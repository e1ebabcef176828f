//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{config::Config, db::Store, queue::WorkQueue, services::Dispatcher};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Transactional store
    store: Arc<dyn Store>,

    /// Dispatcher over the judge work queues
    dispatcher: Dispatcher,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn Store>, queue: Arc<dyn WorkQueue>, config: Config) -> Self {
        let dispatcher = Dispatcher::from_config(queue, &config.dispatch);

        Self {
            inner: Arc::new(AppStateInner {
                store,
                dispatcher,
                config,
            }),
        }
    }

    /// Get a reference to the store
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Get a reference to the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
