mod ai;
mod config;
mod controller;
mod errors;
mod export;
mod models;
mod routes;
mod state;
mod store;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::{AiAssist, AnthropicAssist, DisabledAssist};
use crate::config::Config;
use crate::controller::Controller;
use crate::export::ExportPipeline;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::DocumentStore;

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

    info!("Starting ResumeFlow v{}", env!("CARGO_PKG_VERSION"));

    // Open durable storage and restore (or seed) the document
    let store = DocumentStore::open(&config.data_dir)?;
    let controller = Arc::new(Controller::restore_or_seed(store, config.seed_mode));

    // AI assistant: enabled only when a key is configured
    let ai: Arc<dyn AiAssist> = match &config.anthropic_api_key {
        Some(key) => {
            info!("AI assistant enabled (model: {})", ai::MODEL);
            Arc::new(AnthropicAssist::new(key.clone()))
        }
        None => {
            info!("AI assistant disabled (no ANTHROPIC_API_KEY)");
            Arc::new(DisabledAssist)
        }
    };

    let state = AppState {
        controller,
        exports: Arc::new(ExportPipeline::new()),
        ai,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
