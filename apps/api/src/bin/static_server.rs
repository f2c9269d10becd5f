//! Serves the chat front-end as static files. Independent of the query API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("static_server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dir: PathBuf = std::env::var("FRONTEND_DIR")
        .unwrap_or_else(|_| "frontend".to_string())
        .into();
    anyhow::ensure!(
        dir.is_dir(),
        "front-end directory '{}' does not exist",
        dir.display()
    );

    let port = std::env::var("STATIC_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .context("STATIC_PORT must be a valid port number")?;

    let app = static_router(dir.clone()).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Serving {} on {addr}", dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Every path maps into `dir`; directories resolve to their `index.html`.
fn static_router(dir: PathBuf) -> Router {
    Router::new().fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
}
