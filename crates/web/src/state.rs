use std::sync::Arc;

use storage::repository::ResultStore;

use crate::error::WebError;

/// Shared handler state: the result store, if one is configured.
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn ResultStore>>,
}

impl AppState {
    pub fn new(store: impl ResultStore + 'static) -> Self {
        Self {
            store: Some(Arc::new(store)),
        }
    }

    pub fn with_store(store: Arc<dyn ResultStore>) -> Self {
        Self { store: Some(store) }
    }

    /// State for a process started without `DATABASE_URL`.
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&dyn ResultStore, WebError> {
        self.store.as_deref().ok_or(WebError::MissingDatabaseUrl)
    }
}
