//! Memviz Core — memory graph model, snapshot store, cache and resolution

pub mod model;
pub mod error;
pub mod store;
pub mod cache;
pub mod service;


#[cfg(test)]
pub mod test_utils;

pub use model::{Entity, Relation, MemoryGraph, EntityDetail};
pub use error::StoreError;
pub use store::{GraphStore, sample_graph, load_from_file};
pub use cache::{GraphCache, Snapshot};
pub use service::{ResolutionService, resolve_entity, related_entities};
