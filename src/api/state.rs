//! Shared state for the HTTP API.

use crate::store::TimeStore;

/// State shared across all API handlers.
pub struct ApiState {
    pub store: TimeStore,
}

impl ApiState {
    pub fn new(store: TimeStore) -> Self {
        Self { store }
    }
}
