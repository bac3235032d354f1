mod chart;
mod config;
mod errors;
mod ingest;
mod llm_client;
mod render;
mod routes;
mod skills;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::skills::{HttpFetcher, SkillExtractor};
use crate::state::AppState;
use crate::tailoring::TailoringEngine;

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

    info!("Starting CareerCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Profile page fetcher for skill extraction
    let extractor = SkillExtractor::new(Arc::new(HttpFetcher::new()?));

    // One LLM client for the process; no credential or MOCK_MODE means every version is mocked
    let llm = LlmClient::from_config(&config)?.map(Arc::new);
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => warn!("No OpenAI credential or MOCK_MODE set: running in mock mode"),
    }
    let engine = TailoringEngine::from_client(llm.clone());

    let state = AppState {
        config: config.clone(),
        llm,
        extractor,
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
