//! Test utilities for memviz-core

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::model::{Entity, MemoryGraph, Relation};

/// A small two-entity graph, distinct from the built-in sample.
pub fn small_graph() -> MemoryGraph {
    MemoryGraph::new(
        vec![
            Entity::new("テストユーザー", "user", ["テスト用観測1", "テスト用観測2"]),
            Entity::new("テスト環境", "environment", ["テスト環境の観測"]),
        ],
        vec![Relation::new("テストユーザー", "テスト環境", "uses")],
    )
}

/// Write `contents` to `graph.json` inside a fresh temp dir.
///
/// The `TempDir` must be kept alive for as long as the file is used.
pub fn write_data_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.json");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// Serialize `graph` into a temp data file.
pub fn write_graph_file(graph: &MemoryGraph) -> (TempDir, PathBuf) {
    let json = serde_json::to_string_pretty(graph).unwrap();
    write_data_file(&json)
}
