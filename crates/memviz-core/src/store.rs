//! Graph store: loads a snapshot from a JSON file or falls back to sample data

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::model::{Entity, MemoryGraph, Relation};

/// Produces graph snapshots. Cheap to clone; holds no loaded data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore {
    data_file: Option<PathBuf>,
}

impl GraphStore {
    pub fn new(data_file: Option<PathBuf>) -> Self {
        GraphStore { data_file }
    }

    /// A store that always serves the built-in sample graph.
    pub fn sample() -> Self {
        GraphStore { data_file: None }
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Load a full graph. Parsing is all-or-nothing.
    ///
    /// A configured file that does not exist is treated as "no file" and the
    /// sample graph is returned.
    pub fn load(&self) -> Result<MemoryGraph> {
        match &self.data_file {
            Some(path) if path.exists() => load_from_file(path),
            Some(path) => {
                warn!(
                    "Data file {} not found, serving sample data",
                    path.display()
                );
                Ok(sample_graph())
            }
            None => {
                debug!("No data file configured, serving sample data");
                Ok(sample_graph())
            }
        }
    }
}

/// Parse a graph from a JSON file on disk.
pub fn load_from_file(path: &Path) -> Result<MemoryGraph> {
    let json_str = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph(path, &json_str)?;

    debug!(
        "Loaded {} entities, {} relations from {}",
        graph.entity_count(),
        graph.relation_count(),
        path.display()
    );
    Ok(graph)
}

/// Parse and validate graph JSON read from `path`.
fn parse_graph(path: &Path, json_str: &str) -> Result<MemoryGraph> {
    let format_error = |reason: String| StoreError::DataFormat {
        path: path.to_path_buf(),
        reason,
    };

    let graph: MemoryGraph =
        serde_json::from_str(json_str).map_err(|e| format_error(e.to_string()))?;
    if let Some(name) = graph.duplicate_entity_name() {
        return Err(format_error(format!("duplicate entity name '{}'", name)));
    }
    Ok(graph)
}

/// The fixed development data set.
pub fn sample_graph() -> MemoryGraph {
    let entities = vec![
        Entity::new(
            "湧心くん",
            "user",
            [
                "Pythonが好き",
                "Reactが好き",
                "フルスタックでフロント寄りのエンジニア",
                "記憶システムに興味がある",
            ],
        ),
        Entity::new(
            "Windows環境",
            "environment",
            [
                "Windowsネイティブコマンドを優先",
                ".batまたは.ps1スクリプトを使用",
            ],
        ),
        Entity::new(
            "Memory MCP",
            "tool",
            [
                "ナレッジグラフベースの記憶システム",
                "エンティティとリレーションで情報を管理",
            ],
        ),
        Entity::new(
            "kakuho",
            "project",
            [
                "イベント予約管理システム",
                "FastAPI + React + TypeScript",
                "半年かけて作成",
            ],
        ),
    ];

    let relations = vec![
        Relation::new("湧心くん", "Windows環境", "uses"),
        Relation::new("湧心くん", "Memory MCP", "uses"),
        Relation::new("湧心くん", "kakuho", "created"),
        Relation::new("Memory MCP", "Windows環境", "runs on"),
    ];

    MemoryGraph::new(entities, relations)
}
