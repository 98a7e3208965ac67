//! Resolution service: whole-graph and single-entity queries

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{GraphCache, Snapshot};
use crate::error::Result;
use crate::model::{EntityDetail, MemoryGraph};
use crate::store::GraphStore;

/// Answers read queries against the cached graph.
pub struct ResolutionService {
    cache: GraphCache,
}

impl ResolutionService {
    pub fn new(store: GraphStore) -> Self {
        ResolutionService {
            cache: GraphCache::new(store),
        }
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// The current snapshot, loading it if needed.
    pub async fn get_graph(&self) -> Result<Arc<Snapshot>> {
        self.cache.get().await
    }

    /// Look up one entity. `Ok(None)` means the name is not in the graph.
    pub async fn get_entity(&self, name: &str) -> Result<Option<EntityDetail>> {
        let snapshot = self.cache.get().await?;
        let detail = resolve_entity(&snapshot.graph, name);
        if detail.is_none() {
            debug!("Entity '{}' not found in snapshot v{}", name, snapshot.version);
        }
        Ok(detail)
    }

    /// Invalidate and reload. Always produces a new snapshot version.
    pub async fn force_refresh(&self) -> Result<Arc<Snapshot>> {
        self.cache.invalidate().await;
        self.get_graph().await
    }
}

impl Default for ResolutionService {
    fn default() -> Self {
        Self::new(GraphStore::sample())
    }
}

/// Build the detail view for `name`, or `None` if no entity has that name.
pub fn resolve_entity(graph: &MemoryGraph, name: &str) -> Option<EntityDetail> {
    let entity = graph.find_entity(name)?;
    Some(EntityDetail {
        name: entity.name.clone(),
        entity_type: entity.entity_type.clone(),
        observations: entity.observations.clone(),
        related_entities: related_entities(graph, name).into_iter().collect(),
    })
}

/// Names on the other end of every relation touching `name`, in either
/// direction. A self-relation makes `name` related to itself.
pub fn related_entities(graph: &MemoryGraph, name: &str) -> BTreeSet<String> {
    graph
        .relations
        .iter()
        .filter_map(|rel| rel.other_end(name))
        .map(str::to_string)
        .collect()
}
