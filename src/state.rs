use crate::database::DocumentStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers
///
/// Holds the document store, if one was configured. Whether it is reachable
/// is decided per request by `middleware::store::require_store`, not stored
/// here.
#[derive(Clone)]
pub struct AppState {
    /// Document store, `None` when the service runs without a database
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    /// Create a new AppState instance
    ///
    /// # Arguments
    /// * `store` - Configured document store, if any
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }
}
