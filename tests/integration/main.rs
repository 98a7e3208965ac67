//! Integration tests for memviz
//!
//! These tests run the real server on an ephemeral port and talk to it over
//! HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use memviz_core::{GraphStore, ResolutionService};
use memviz_server::{MemvizServer, ServerConfig};
use serde_json::Value;
use tokio::net::TcpListener;

/// Start a server in the background and return its address
async fn spawn_server(data_file: Option<PathBuf>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let service = ResolutionService::new(GraphStore::new(data_file));
    let config = ServerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        cors_origins: vec!["http://localhost:5173".to_string()],
    };
    let server = MemvizServer::new(service, config);
    tokio::spawn(async move {
        if let Err(e) = server.serve(listener).await {
            eprintln!("server error: {}", e);
        }
    });

    addr
}

async fn get_json(url: String) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_sample_graph_end_to_end() {
    let addr = spawn_server(None).await;

    let (status, graph) = get_json(format!("http://{}/api/graph", addr)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(graph["entities"].as_array().unwrap().len(), 4);
    assert_eq!(graph["relations"].as_array().unwrap().len(), 4);

    // Pick the first relation's source and check it sees the target
    let from = graph["relations"][0]["from"].as_str().unwrap().to_string();
    let to = graph["relations"][0]["to"].as_str().unwrap().to_string();
    let url = reqwest::Url::parse(&format!("http://{}/api/entities/", addr))
        .unwrap()
        .join(&from)
        .unwrap();
    let (status, detail) = get_json(url.to_string()).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(detail["name"], from.as_str());
    assert!(detail["relatedEntities"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == to.as_str()));
}

#[tokio::test]
async fn test_missing_entity_is_404() {
    let addr = spawn_server(None).await;
    let url = reqwest::Url::parse(&format!("http://{}/api/entities/", addr))
        .unwrap()
        .join("存在しないエンティティ")
        .unwrap();

    let (status, body) = get_json(url.to_string()).await;
    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_data_file_and_refresh() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.json");
    std::fs::write(
        &path,
        r#"{
            "entities": [
                {"type": "entity", "name": "alpha", "entityType": "thing", "observations": ["first"]}
            ],
            "relations": []
        }"#,
    )
    .unwrap();

    let addr = spawn_server(Some(path.clone())).await;

    let (_, graph) = get_json(format!("http://{}/api/graph", addr)).await;
    assert_eq!(graph["entities"][0]["name"], "alpha");

    // Cached until refreshed
    std::fs::write(
        &path,
        r#"{
            "entities": [
                {"name": "alpha", "entityType": "thing", "observations": ["first"]},
                {"name": "beta", "entityType": "thing"}
            ],
            "relations": [{"from": "alpha", "to": "beta", "relationType": "knows"}]
        }"#,
    )
    .unwrap();
    let (_, cached) = get_json(format!("http://{}/api/graph", addr)).await;
    assert_eq!(cached["entities"].as_array().unwrap().len(), 1);

    let (status, refreshed) = get_json(format!("http://{}/api/graph/refresh", addr)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(refreshed["entities"].as_array().unwrap().len(), 2);

    let (_, beta) = get_json(format!("http://{}/api/entities/beta", addr)).await;
    assert_eq!(beta["relatedEntities"], serde_json::json!(["alpha"]));
    assert_eq!(beta["observations"], serde_json::json!([]));
}

#[tokio::test]
async fn test_health_and_root() {
    let addr = spawn_server(None).await;

    let (_, health) = get_json(format!("http://{}/api/health", addr)).await;
    assert_eq!(health, serde_json::json!({"status": "ok", "service": "memory-viz-api"}));

    let (_, root) = get_json(format!("http://{}/", addr)).await;
    assert_eq!(root["name"], "Memory MCP Visualization API");
}
