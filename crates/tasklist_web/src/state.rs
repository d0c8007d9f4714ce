//! Shared handler state.

use crate::error::AppError;
use std::sync::Arc;
use tasklist_core::{StoreResult, TaskStore};

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    /// Runs one store call on the blocking pool.
    ///
    /// The outer `Err` means the call never completed (worker panicked); the
    /// inner result is the store's own answer for the handler to inspect.
    pub async fn call<T, F>(&self, f: F) -> Result<StoreResult<T>, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&TaskStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|err| AppError::internal(format!("store worker failed: {err}")))
    }
}
