//! Server entry point: load configuration, set up logging, run the transport.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use devtools_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone());
    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");
    Ok(())
}

/// Log to stderr; stdout belongs to the STDIO transport.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str, with_timestamps: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
