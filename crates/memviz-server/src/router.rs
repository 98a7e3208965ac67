//! Axum router setup for the memviz server

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        docs, get_entity, get_graph, health_check, method_not_allowed, not_found,
        refresh_graph, root, SNAPSHOT_VERSION_HEADER,
    },
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>, cors_origins: &[String]) -> anyhow::Result<Router> {
    // Each route answers other methods with a JSON 405
    let router = Router::new()
        .route("/", get(root).fallback(method_not_allowed))
        .route("/docs", get(docs).fallback(method_not_allowed))
        // REST API endpoints
        .route("/api/graph", get(get_graph).fallback(method_not_allowed))
        .route("/api/graph/refresh", get(refresh_graph).fallback(method_not_allowed))
        .route("/api/entities/:name", get(get_entity).fallback(method_not_allowed))
        .route("/api/health", get(health_check).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Ok(router)
}

/// CORS for the configured origins. A `*` entry allows any origin, without
/// credentials.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let methods = [Method::GET, Method::OPTIONS];
    let exposed = [HeaderName::from_static(SNAPSHOT_VERSION_HEADER)];

    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(exposed));
    }

    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{}'", o)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers(exposed))
}
