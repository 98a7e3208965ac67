//! REST API handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    response::{IntoResponse, Json, Response},
};
use memviz_core::{EntityDetail, Snapshot};
use serde::Serialize;
use tracing::debug;

use crate::{ApiError, ServerState};

pub const API_NAME: &str = "Memory MCP Visualization API";
pub const SERVICE_ID: &str = "memory-viz-api";
pub const SNAPSHOT_VERSION_HEADER: &str = "x-snapshot-version";

/// Service descriptor returned from `/`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<EndpointDoc>,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("/", "Service descriptor"),
    ("/docs", "This endpoint listing"),
    ("/api/graph", "Full graph (cached)"),
    ("/api/graph/refresh", "Full graph after dropping the cache"),
    ("/api/entities/{name}", "One entity and the names related to it"),
    ("/api/health", "Liveness check"),
];

fn graph_response(snapshot: Arc<Snapshot>) -> Response {
    (
        [(SNAPSHOT_VERSION_HEADER, snapshot.version.to_string())],
        Json(&snapshot.graph),
    )
        .into_response()
}

pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: API_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
        health: "/api/health".to_string(),
    })
}

pub async fn docs() -> impl IntoResponse {
    Json(DocsResponse {
        name: API_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(path, description)| EndpointDoc {
                method: "GET",
                path,
                description,
            })
            .collect(),
    })
}

/// Get the current graph as JSON
pub async fn get_graph(State(state): State<Arc<ServerState>>) -> Result<Response, ApiError> {
    let snapshot = state
        .service
        .get_graph()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to fetch graph data: {}", e)))?;
    Ok(graph_response(snapshot))
}

/// Drop the cached graph and return a freshly loaded one
pub async fn refresh_graph(State(state): State<Arc<ServerState>>) -> Result<Response, ApiError> {
    let snapshot = state
        .service
        .force_refresh()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to refresh graph data: {}", e)))?;
    Ok(graph_response(snapshot))
}

pub async fn get_entity(
    State(state): State<Arc<ServerState>>,
    name: Result<Path<String>, PathRejection>,
    uri: Uri,
) -> Result<Json<EntityDetail>, ApiError> {
    let name = match name {
        Ok(Path(name)) => name,
        Err(rejection) => {
            debug!("Falling back to lossy entity name decoding: {}", rejection);
            lossy_last_segment(&uri)
        }
    };

    state
        .service
        .get_entity(&name)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to fetch entity: {}", e)))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Entity '{}' not found", name)))
}

/// Percent-decode the final path segment, replacing invalid UTF-8 with U+FFFD.
fn lossy_last_segment(uri: &Uri) -> String {
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_ID.to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
