mod config;
mod db;
mod errors;
mod extract;
mod intake;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::intake::extractor::{LlmProfileExtractor, ProfileExtractor};
use crate::llm_client::LlmClient;
use crate::matching::catalog::Catalog;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryProfileStore, PgProfileStore, ProfileStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UniMatch API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin(),
    };
    if catalog.is_empty() {
        warn!("Catalog is empty; every recommendation list will be empty");
    }
    info!("Catalog ready with {} institutions", catalog.len());

    let store: Arc<dyn ProfileStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgProfileStore::new(pool))
        }
        None => Arc::new(InMemoryProfileStore::new()),
    };
    info!("Profile store initialized (backend: {})", store.backend());

    let extractor: Option<Arc<dyn ProfileExtractor>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmProfileExtractor(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; free-text profile extraction disabled");
            None
        }
    };

    let state = AppState {
        store: store.clone(),
        extractor,
        catalog: Arc::new(catalog),
    };

    // The web page that shows recommendations is served from another origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing profile store");
    store.close().await;

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
