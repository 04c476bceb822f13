use std::sync::Arc;

use crate::config::Config;
use crate::resume::document::DocumentTextExtractor;
use crate::skills::enrichment::SkillEnricher;
use crate::skills::pipeline::{SkillEngine, SkillReport};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Taxonomy and conflict map, built once at startup.
    pub engine: Arc<SkillEngine>,
    /// Optional candidate source. `None` means every request uses the taxonomy scan.
    pub enricher: Option<Arc<dyn SkillEnricher>>,
    pub documents: Arc<dyn DocumentTextExtractor>,
    pub config: Config,
}

impl AppState {
    /// Runs the extraction pipeline with the configured enricher and timeout.
    pub async fn extract(&self, text: &str) -> SkillReport {
        self.engine
            .extract_with_enrichment(
                text,
                self.enricher.as_deref(),
                self.config.enrichment_timeout(),
            )
            .await
    }
}
