//! Snapshot cache with explicit invalidation

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::model::MemoryGraph;
use crate::store::GraphStore;

/// An immutable, versioned graph. Replaced whole, never mutated.
#[derive(Debug)]
pub struct Snapshot {
    /// Increases by one on every load, even when content is unchanged.
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub graph: MemoryGraph,
}

struct CacheState {
    store: GraphStore,
    current: Option<Arc<Snapshot>>,
}

/// Memoizes the store's output until invalidated.
///
/// Store and snapshot share one lock, so a source change and a fill can
/// never interleave.
pub struct GraphCache {
    state: RwLock<CacheState>,
    loads: AtomicU64,
}

impl GraphCache {
    pub fn new(store: GraphStore) -> Self {
        GraphCache {
            state: RwLock::new(CacheState {
                store,
                current: None,
            }),
            loads: AtomicU64::new(0),
        }
    }

    /// Return the current snapshot, loading it on a miss.
    pub async fn get(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.state.read().await.current.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut state = self.state.write().await;
        // Another caller may have filled the slot while we waited.
        if let Some(snapshot) = state.current.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let store = state.store.clone();
        let graph = tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;

        let version = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot {
            version,
            loaded_at: Utc::now(),
            graph,
        });
        info!(
            "Loaded graph snapshot v{}: {} entities, {} relations",
            version,
            snapshot.graph.entity_count(),
            snapshot.graph.relation_count()
        );
        state.current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop the current snapshot; the next `get` reloads.
    pub async fn invalidate(&self) {
        self.state.write().await.current = None;
        debug!("Graph cache invalidated");
    }

    /// Point the store at a different data file and invalidate.
    pub async fn set_source(&self, data_file: Option<PathBuf>) {
        let mut state = self.state.write().await;
        match &data_file {
            Some(path) => info!("Graph source set to {}", path.display()),
            None => info!("Graph source set to sample data"),
        }
        state.store = GraphStore::new(data_file);
        state.current = None;
    }

    pub async fn source(&self) -> Option<PathBuf> {
        self.state.read().await.store.data_file().map(PathBuf::from)
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.current.is_some()
    }

    /// Number of successful loads so far.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(GraphStore::sample())
    }
}
