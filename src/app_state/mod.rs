use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::EntityStore;

pub type EntityStoreType = Arc<RwLock<dyn EntityStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub entity_store: EntityStoreType,
}

impl AppState {
    pub fn new(entity_store: EntityStoreType) -> Self {
        Self { entity_store }
    }
}
