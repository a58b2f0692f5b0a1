mod analyses;
mod ats;
mod config;
mod db;
mod enhance;
mod errors;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyses::{AnalysisStore, MemoryAnalysisStore, PgAnalysisStore};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{ChatModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobfit API v{}", env!("CARGO_PKG_VERSION"));

    // Analysis store: Postgres when configured, process memory otherwise
    let analyses: Arc<dyn AnalysisStore> = match &config.database_url {
        Some(url) => Arc::new(PgAnalysisStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; analyses are kept in memory and lost on restart");
            Arc::new(MemoryAnalysisStore::default())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model_name(),
        config.llm_timeout.as_secs()
    );

    let state = AppState {
        llm: Arc::new(llm),
        analyses,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
