mod hashmap_entity_store;
mod postgres_entity_store;

pub use hashmap_entity_store::*;
pub use postgres_entity_store::*;
