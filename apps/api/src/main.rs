mod config;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::document::FileTypeExtractor;
use crate::routes::build_router;
use crate::skills::enrichment::{LlmSkillEnricher, SkillEnricher};
use crate::skills::pipeline::SkillEngine;
use crate::state::AppState;

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

    info!("Starting skillscan v{}", env!("CARGO_PKG_VERSION"));

    // A broken catalog is fatal
    let engine = SkillEngine::with_default_catalog().context("Failed to build skill taxonomy")?;
    info!(
        "Skill engine ready: {} skills, {} categories, {} conflicting names",
        engine.taxonomy().len(),
        engine.taxonomy().categories().len(),
        engine.conflicts().len()
    );

    let enricher = build_enricher(&config)?;

    let state = AppState {
        engine: Arc::new(engine),
        enricher,
        documents: Arc::new(FileTypeExtractor),
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

/// LLM enrichment when an API key is configured. Enrichment is never retried.
fn build_enricher(config: &Config) -> Result<Option<Arc<dyn SkillEnricher>>> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY not set; skill extraction will use the taxonomy scan only");
        return Ok(None);
    };

    let llm = LlmClient::new(api_key)
        .context("Failed to build LLM client")?
        .with_max_attempts(1);
    info!(
        "Skill enrichment enabled (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.enrichment_timeout()
    );

    Ok(Some(Arc::new(LlmSkillEnricher::new(llm))))
}
