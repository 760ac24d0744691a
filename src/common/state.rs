use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::registry::{Page, UserSensorRegistry};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub registry: UserSensorRegistry,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let registry = UserSensorRegistry::new(db.clone());

        Self {
            db,
            config: Arc::new(config),
            registry,
        }
    }

    /// First search window, sized by `DEFAULT_PAGE_SIZE`.
    #[must_use]
    pub fn first_page(&self) -> Page {
        Page::first(self.config.default_page_size)
    }
}
