//! Application state for the timesheet export API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::storage::Storage;

/// Shared application state.
///
/// Holds the loaded settings and the storage adapter the exports read from.
/// Every export builds its own workbooks; nothing here is mutated.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    storage: Arc<dyn Storage>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new<S: Storage + 'static>(config: ConfigLoader, storage: S) -> Self {
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the storage adapter.
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
