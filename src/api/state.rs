//! Application state for the Increment Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::Store;

/// Shared application state.
///
/// Holds the record store shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The employee and policy store.
    store: Arc<Store>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
