mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::{LlmAnalyzer, ResumeAnalyzer};
use crate::analysis::fixture::FixtureAnalyzer;
use crate::config::{AnalyzerBackend, Config};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
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

    info!("Starting Insight API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config)?;
    info!(
        "Analyzer backend: {} (timeout {}s, max {} chars)",
        analyzer.backend(),
        config.analysis_timeout.as_secs(),
        config.max_resume_chars
    );

    let port = config.port;
    let state = AppState::new(config, analyzer);

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the collaborator named by `ANALYZER_BACKEND`.
fn build_analyzer(config: &Config) -> Result<Arc<dyn ResumeAnalyzer>> {
    let analyzer: Arc<dyn ResumeAnalyzer> = match config.analyzer_backend {
        AnalyzerBackend::Fixture => Arc::new(FixtureAnalyzer::new(config.fixture_delay)),
        AnalyzerBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required for the llm backend")?;
            let llm = LlmClient::new(api_key).context("Failed to build HTTP client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmAnalyzer(llm))
        }
    };
    Ok(analyzer)
}
