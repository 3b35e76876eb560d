use std::sync::Arc;

use crate::config::AppConfig;
use crate::operations::StorageOps;
use crate::storage::ObjectStore;

/// Shared request state, built once at startup and handed to every handler / 应用状态
pub struct AppState {
    pub ops: StorageOps,
    /// Name of the one-shot status message cookie
    pub flash_cookie: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, region: impl Into<String>, config: &AppConfig) -> Self {
        Self {
            ops: StorageOps::new(store, region),
            flash_cookie: config.console.flash_cookie.clone(),
        }
    }
}
