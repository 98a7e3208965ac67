//! Memviz CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

mod commands;

#[derive(Parser)]
#[command(name = "memviz")]
#[command(about = "REST API serving a memory knowledge graph for visualization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (overrides --log-level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// JSON graph file to serve instead of the built-in sample data
    #[arg(long, env = "MEMORY_DATA_FILE", global = true)]
    data_file: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "API_PORT", default_value = "8000", global = true)]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0", global = true)]
    host: String,

    /// Comma-separated list of allowed CORS origins
    #[arg(long, env = "CORS_ORIGINS", default_value = "http://localhost:5173", global = true)]
    cors_origins: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server (default)
    Serve,
    /// Print the full graph as JSON and exit
    Graph,
    /// Print one entity with its related entities and exit
    Entity {
        /// Exact entity name
        name: String,
    },
    /// Show version
    Version,
}

/// Build the log filter for the workspace crates. Accepts uvicorn-style
/// `warning` and `critical` alongside tracing's own level names.
fn log_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let level = match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        other => other.to_string(),
    };
    let level: LevelFilter = level
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid log level '{}'", level))?;

    Ok(EnvFilter::try_new(format!(
        "memviz={0},memviz_core={0},memviz_server={0},tower_http={0}",
        level
    ))?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; explicit env vars still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    tracing_subscriber::registry()
        .with(log_filter(log_level)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Memviz v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            commands::serve(cli.data_file, cli.host, cli.port, &cli.cors_origins).await
        }
        Commands::Graph => commands::graph(cli.data_file).await,
        Commands::Entity { name } => commands::entity(cli.data_file, &name).await,
        Commands::Version => {
            println!("Memviz v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
