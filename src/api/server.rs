use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{services, state::AppState};
use crate::config::Config;
use crate::dispatch::DispatchEngine;
use crate::observability::Metrics;
use crate::store::ConfigurationStore;
use crate::upstream::HttpFetcher;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    // Load config
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;
    let address = address.unwrap_or(config.server.bind_addr);

    let fetch = Arc::new(
        HttpFetcher::new(&config.upstream)
            .map_err(|e| format!("Failed to build upstream client: {}", e))?,
    );

    // Discover upstream manifests before accepting traffic
    info!(
        configurations = config.configs.len(),
        "Initializing configuration store"
    );
    let store = Arc::new(ConfigurationStore::initialize(&config, fetch.as_ref()).await);

    let metrics = Arc::new(Metrics::new());
    let engine = DispatchEngine::new(store.clone(), fetch, metrics.clone());
    let state = AppState::new(config, store, engine, metrics);

    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "AddonHub listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Full route table. Integration tests build this same router against mock
/// upstreams instead of binding a socket.
///
/// Route order matters only for readers: static segments such as
/// `manifest.json` always win over the trailing wildcard.
pub fn router(state: AppState) -> Router {
    // Addon clients are browser-embedded players; answer preflights for
    // any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(services::health))
        .route("/{config}/manifest.json", get(services::manifest))
        .route("/{config}/catalog", post(services::catalog))
        .route("/{config}/meta", post(services::meta))
        .route("/{config}/stream", post(services::stream))
        .route("/{config}/subtitles", post(services::subtitles))
        .route(
            "/{config}/channels",
            get(services::channels_listing).post(services::channels),
        )
        .route("/{config}/{*path}", get(services::legacy))
        .with_state(state)
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
