//! Server-side render relay host.
//!
//! Serves an application shell for every path and fills it with markup
//! rendered by an external process.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌───────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ request id → trace → relay middleware       │
//!                           │                          │                    │
//!                           │                          ▼                    │
//!                           │                    shell handler              │
//!                           │                   (ViewContext)               │
//!                           │                          │                    │
//!                           │          AJAX ◀──────────┴──────▶ full page   │
//!                           │       view data                  POST data ───┼──▶ Renderer
//!                           │        as JSON                   merge    ◀───┼─── markup
//!     Client Response       │                                  re-render    │
//!     ◀─────────────────────┼───────────────────────────────────────────────┘
//! ```
//!
//! The config file path is taken from `SSR_RELAY_CONFIG`; without it the
//! defaults are used.

use std::path::PathBuf;

use ssr_relay::config::{load_config, RelayConfig};
use ssr_relay::lifecycle::{signals, Shutdown};
use ssr_relay::observability::{logging, metrics};
use ssr_relay::HttpServer;
use tokio::net::TcpListener;

const CONFIG_ENV: &str = "SSR_RELAY_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("ssr-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        renderer_host = %config.renderer.host,
        renderer_port = config.renderer.port,
        connect_timeout_ms = config.renderer.connect_timeout,
        timeout_ms = config.renderer.timeout,
        "Configuration loaded"
    );

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
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    signals::shutdown_on_signal(&shutdown).await;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
