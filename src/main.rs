//! Drive image finder.
//!
//! Serves the calling platform's `/content/resources/find` webhook.
//!
//! # Architecture Overview
//!
//! ```text
//!     Platform request
//!     ───────────────▶ ┌─────────────┐   ┌──────────────────┐   ┌─────────────┐
//!                      │ http server │──▶│  webhook auth    │──▶│  handlers   │
//!                      │ id/limit/   │   │ freshness, path, │   │ find → page │
//!                      │ timeout     │   │ HMAC signature   │   │ of images   │
//!                      └─────────────┘   └────────┬─────────┘   └──────┬──────┘
//!                                                 │ 401                │
//!     ◀───────────────────────────────────────────┴────────────────────┘
//!                                                              ResourceSource
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use drive_image_finder::config::loader::set_port;
use drive_image_finder::config::{load_config, validation::validate_config, ConfigError};
use drive_image_finder::lifecycle::{build_state, Shutdown};
use drive_image_finder::observability::{logging, metrics};
use drive_image_finder::HttpServer;

#[derive(Parser)]
#[command(name = "drive-image-finder")]
#[command(about = "Signed webhook endpoint listing image resources", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "WEBHOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Listener port; overrides the configured bind address port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        set_port(&mut config, port)?;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("drive-image-finder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        leniency_secs = config.auth.leniency_secs,
        "Configuration loaded"
    );

    let state = build_state(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config, state)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
