//! CLI command implementations

use memviz_core::{GraphStore, ResolutionService};
use memviz_server::{parse_origins, MemvizServer, ServerConfig};
use std::path::PathBuf;

pub async fn serve(
    data_file: Option<PathBuf>,
    host: String,
    port: u16,
    cors_origins: &str,
) -> anyhow::Result<()> {
    tracing::info!("Starting memviz API on {}:{}", host, port);
    match &data_file {
        Some(path) => tracing::info!("Data file: {}", path.display()),
        None => tracing::info!("No data file configured, serving sample data"),
    }

    let cors_origins = parse_origins(cors_origins);
    tracing::debug!("Allowed CORS origins: {:?}", cors_origins);

    let service = ResolutionService::new(GraphStore::new(data_file));
    let config = ServerConfig {
        host,
        port,
        cors_origins,
    };
    MemvizServer::new(service, config).start().await
}

pub async fn graph(data_file: Option<PathBuf>) -> anyhow::Result<()> {
    let service = ResolutionService::new(GraphStore::new(data_file));
    let snapshot = service.get_graph().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot.graph)?);
    Ok(())
}

pub async fn entity(data_file: Option<PathBuf>, name: &str) -> anyhow::Result<()> {
    let service = ResolutionService::new(GraphStore::new(data_file));
    match service.get_entity(name).await? {
        Some(detail) => {
            println!("{}", serde_json::to_string_pretty(&detail)?);
            Ok(())
        }
        None => anyhow::bail!("Entity '{}' not found", name),
    }
}
