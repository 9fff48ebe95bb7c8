//! Shared application state for all routes.

use crate::db::Database;
use crate::resource::Resource;
use crate::service::ResourceStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }

    /// Store for entity `T` over the shared pool.
    pub fn store<T: Resource>(&self) -> ResourceStore<T> {
        ResourceStore::new(self.db.clone())
    }
}
