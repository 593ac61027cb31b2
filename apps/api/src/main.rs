mod config;
mod errors;
mod extract;
mod inference;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::inference::cache::ModelCache;
use crate::inference::decoder::PlaceholderDecoder;
use crate::inference::loader::{FsModelLoader, ModelLoader};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter API v{}", env!("CARGO_PKG_VERSION"));

    // Models are loaded lazily; only report what is on disk.
    let loader = Arc::new(FsModelLoader::new(config.models_dir.clone()));
    match loader.available() {
        Ok(ids) if ids.is_empty() => warn!(
            "No model artifacts found under {}",
            loader.root().display()
        ),
        Ok(ids) => info!(
            "Model artifacts under {}: {}",
            loader.root().display(),
            ids.join(", ")
        ),
        Err(e) => warn!("Could not scan models directory: {e}"),
    }

    let state = AppState {
        models: Arc::new(ModelCache::new(loader)),
        decoder: Arc::new(PlaceholderDecoder),
        config: config.clone(),
    };
    info!("Default model type: {}", state.config.default_model_type);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
