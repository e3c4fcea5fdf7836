//! Serve command - runs the HTTP API, optionally alongside the front-end bundle

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging;
use crate::infrastructure::observability::{create_metrics_router, init_metrics, PrometheusMetrics};

/// Arguments for the serve command
#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding the entity JSON files (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep records in memory only; nothing is written to disk
    #[arg(long)]
    pub memory: bool,

    /// Built front-end to serve at `/`
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        super::override_data_dir(config, self.data_dir.as_ref());
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }
    }
}

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = super::load_config()?;
    args.apply(&mut config);
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config);
    let metrics = init_metrics(&config.metrics);
    let app = build_app(state, metrics, &config);

    let addr = build_socket_addr(&config)?;
    info!("NeuroTrack API server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

/// API router plus the metrics endpoint and the static front-end, when configured
pub fn build_app(state: AppState, metrics: Option<PrometheusMetrics>, config: &AppConfig) -> Router {
    let mut router = create_router(state);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m, &config.metrics.path));
    }

    if let Some(dir) = &config.server.static_dir {
        info!("Serving front-end from {}", dir.display());
        router = router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        );
    }

    router
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
