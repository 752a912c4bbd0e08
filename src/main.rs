//! Reactive route demo service.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  SERVICE                     │
//!                         │                                              │
//!    Client Request       │  ┌─────────┐    ┌──────────────┐             │
//!    ─────────────────────┼─▶│  http   │───▶│ route table  │             │
//!                         │  │ server  │    │  (exact)     │             │
//!                         │  └─────────┘    └──────┬───────┘             │
//!                         │                        ▼                     │
//!                         │               ┌────────────────┐             │
//!                         │               │   handlers     │             │
//!                         │               └───┬────────┬───┘             │
//!                         │                   ▼        ▼                 │
//!                         │           ┌──────────┐ ┌──────────┐          │
//!                         │           │ sequence │ │ payload  │          │
//!                         │           │ producer │ │ provider │          │
//!                         │           └──────────┘ └──────────┘          │
//!    Client Response      │  ┌──────────────────┐                        │
//!    ◀────────────────────┼──│ response (SSE /  │                        │
//!                         │  │ JSON / text)     │                        │
//!                         │  └──────────────────┘                        │
//!                         │                                              │
//!                         │  docs grouper ── reads route metadata only   │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use reactive_routes::config::{load_config, ServiceConfig};
use reactive_routes::lifecycle::signals::spawn_signal_listener;
use reactive_routes::observability::{logging, metrics};
use reactive_routes::{App, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "reactive-routes")]
#[command(about = "Demo HTTP service for streamed, immediate and awaited responses", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "ROUTES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long, env = "ROUTES_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("reactive-routes v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_file = ?cli.config,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let app = match App::build(config) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            tracing::error!(error = %e, "Application startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    HttpServer::new(app).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
