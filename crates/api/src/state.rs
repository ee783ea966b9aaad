use std::sync::Arc;

use infra::Store;

use crate::config::AppConfig;
use crate::services::NotificationHub;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub hub: NotificationHub,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, hub: NotificationHub, config: AppConfig) -> Self {
        Self {
            store,
            hub,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
