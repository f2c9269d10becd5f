mod config;
mod errors;
mod index;
mod ingest;
mod llm_client;
mod query;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::StartupError;
use crate::index::VectorIndex;
use crate::llm_client::GeminiClient;
use crate::query::PromptComposer;
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
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Nova resume assistant v{}", env!("CARGO_PKG_VERSION"));

    // Nothing is served until the index is complete.
    let state = bootstrap(&config).await.inspect_err(|e| {
        error!(stage = e.stage(), "Startup failed: {e}");
    })?;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs the boot stages in order: credentials, ingestion, client, index.
async fn bootstrap(config: &Config) -> Result<AppState, StartupError> {
    let api_key = config
        .google_api_key
        .clone()
        .ok_or(StartupError::MissingCredentials)?;
    info!("Google API key found");

    info!(path = %config.resume_path.display(), "Loading and chunking resume...");
    let chunks = ingest::load_resume(&config.resume_path).await?;
    info!("Loaded {} text chunks from resume", chunks.len());

    let client = GeminiClient::new(api_key).map_err(StartupError::LlmInit)?;
    info!(
        "Gemini client initialized (chat: {}, embeddings: {})",
        llm_client::MODEL,
        llm_client::embeddings::EMBEDDING_MODEL
    );

    info!("Creating embeddings and vector index...");
    let index = VectorIndex::build(chunks, &client).await?;

    let client = Arc::new(client);
    Ok(AppState {
        index: Arc::new(index),
        embedder: client.clone(),
        llm: client,
        composer: PromptComposer::new(config.subject_name.clone()),
    })
}
