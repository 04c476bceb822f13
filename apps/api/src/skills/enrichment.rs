//! Enrichment — optional LLM-backed candidate generation.
//!
//! The collaborator is untrusted: its output is parsed into strictly validated
//! `Candidate`s, and any failure (not configured, timeout, HTTP error, malformed JSON) turns
//! into `CandidateGeneration::Fallback` so the pipeline scans the taxonomy instead.
//! Nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::skills::experience::ProficiencyLevel;
use crate::skills::pipeline::{Candidate, CandidateGeneration};
use crate::skills::prompts::{SKILL_SUGGEST_PROMPT, SKILL_SUGGEST_SYSTEM};
use crate::skills::taxonomy::SkillCategory;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichmentUnavailable {
    #[error("enrichment is not configured")]
    NotConfigured,

    #[error("enrichment timed out after {0:?}")]
    TimedOut(Duration),

    #[error("enrichment call failed: {0}")]
    Failed(String),

    #[error("enrichment returned malformed data: {0}")]
    Malformed(String),
}

/// A source of candidate skills. Implementations may be slow or fail; callers bound them
/// with `generate_candidates`.
#[async_trait]
pub trait SkillEnricher: Send + Sync {
    async fn suggest(&self, text: &str) -> Result<Vec<Candidate>, EnrichmentUnavailable>;
}

/// Runs the enricher under `timeout`. Exactly one attempt is made.
pub async fn generate_candidates(
    enricher: Option<&dyn SkillEnricher>,
    text: &str,
    timeout: Duration,
) -> CandidateGeneration {
    let Some(enricher) = enricher else {
        return CandidateGeneration::Fallback(EnrichmentUnavailable::NotConfigured);
    };

    match tokio::time::timeout(timeout, enricher.suggest(text)).await {
        Ok(Ok(candidates)) => {
            debug!("Enrichment returned {} candidates", candidates.len());
            CandidateGeneration::Enriched(candidates)
        }
        Ok(Err(e)) => {
            warn!("Enrichment unavailable, falling back to taxonomy scan: {e}");
            CandidateGeneration::Fallback(e)
        }
        Err(_) => {
            warn!("Enrichment timed out after {timeout:?}, falling back to taxonomy scan");
            CandidateGeneration::Fallback(EnrichmentUnavailable::TimedOut(timeout))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(alias = "name")]
    skill: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    level: Option<String>,
}

/// Parses the collaborator's JSON into candidates.
///
/// Accepts `{"skills": [...]}` or a bare array. A single entry that fails validation (not
/// an object, blank name, unknown category) is dropped on its own; an unrecognized level
/// is treated as absent. A non-empty batch in which nothing validates is malformed.
pub fn parse_candidates(value: &Value) -> Result<Vec<Candidate>, EnrichmentUnavailable> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("skills")
            .and_then(Value::as_array)
            .ok_or_else(|| EnrichmentUnavailable::Malformed("missing 'skills' array".into()))?,
        other => {
            return Err(EnrichmentUnavailable::Malformed(format!(
                "expected object or array, got {}",
                json_kind(other)
            )))
        }
    };

    let candidates: Vec<Candidate> = items.iter().filter_map(validate_candidate).collect();

    if candidates.is_empty() && !items.is_empty() {
        return Err(EnrichmentUnavailable::Malformed(format!(
            "none of {} suggested skills passed validation",
            items.len()
        )));
    }

    Ok(candidates)
}

fn validate_candidate(item: &Value) -> Option<Candidate> {
    let raw: RawCandidate = match serde_json::from_value(item.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Dropping malformed candidate {item}: {e}");
            return None;
        }
    };

    let skill = raw.skill.trim();
    if skill.is_empty() {
        debug!("Dropping candidate with blank skill name");
        return None;
    }

    let category = match raw.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) => match SkillCategory::from_label(label) {
            Some(category) => Some(category),
            None => {
                debug!("Dropping candidate '{skill}' with unknown category '{label}'");
                return None;
            }
        },
    };

    let level = raw
        .level
        .as_deref()
        .and_then(|l| l.parse::<ProficiencyLevel>().ok());

    Some(Candidate {
        skill: skill.to_string(),
        category,
        level,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed enricher
// ────────────────────────────────────────────────────────────────────────────

/// Suggests candidates through the shared `LlmClient`.
pub struct LlmSkillEnricher {
    llm: LlmClient,
}

impl LlmSkillEnricher {
    /// `llm` should be built without retries; the pipeline never retries enrichment.
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillEnricher for LlmSkillEnricher {
    async fn suggest(&self, text: &str) -> Result<Vec<Candidate>, EnrichmentUnavailable> {
        let prompt = SKILL_SUGGEST_PROMPT.replace("{text}", text);
        let system = format!("{SKILL_SUGGEST_SYSTEM} {JSON_ONLY_SYSTEM}");

        let value: Value = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|err| match err {
                LlmError::Parse(e) => EnrichmentUnavailable::Malformed(e.to_string()),
                LlmError::EmptyContent => {
                    EnrichmentUnavailable::Malformed("LLM returned empty content".to_string())
                }
                other => EnrichmentUnavailable::Failed(other.to_string()),
            })?;

        parse_candidates(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedEnricher(Vec<Candidate>);

    #[async_trait]
    impl SkillEnricher for FixedEnricher {
        async fn suggest(&self, _text: &str) -> Result<Vec<Candidate>, EnrichmentUnavailable> {
            Ok(self.0.clone())
        }
    }

    struct FailingEnricher;

    #[async_trait]
    impl SkillEnricher for FailingEnricher {
        async fn suggest(&self, _text: &str) -> Result<Vec<Candidate>, EnrichmentUnavailable> {
            Err(EnrichmentUnavailable::Failed("HTTP error: connection refused".into()))
        }
    }

    struct SlowEnricher;

    #[async_trait]
    impl SkillEnricher for SlowEnricher {
        async fn suggest(&self, _text: &str) -> Result<Vec<Candidate>, EnrichmentUnavailable> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![])
        }
    }

    #[test]
    fn test_parse_wrapped_candidates() {
        let value = json!({
            "skills": [
                {"skill": "Python", "category": "Programming Languages", "level": "Advanced"},
                {"name": "Docker", "category": null, "level": null},
                {"skill": "React"}
            ]
        });
        let candidates = parse_candidates(&value).unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].skill, "Python");
        assert_eq!(candidates[0].category, Some(SkillCategory::ProgrammingLanguages));
        assert_eq!(candidates[0].level, Some(ProficiencyLevel::Advanced));
        assert_eq!(candidates[1].skill, "Docker");
        assert_eq!(candidates[1].category, None);
        assert_eq!(candidates[2].level, None);
    }

    #[test]
    fn test_parse_bare_array() {
        let value = json!([{"skill": "Rust", "category": "programming languages"}]);
        let candidates = parse_candidates(&value).unwrap();
        assert_eq!(candidates[0].category, Some(SkillCategory::ProgrammingLanguages));
    }

    #[test]
    fn test_invalid_candidates_dropped_individually() {
        let value = json!({
            "skills": [
                {"skill": "Python"},
                {"skill": "   "},
                {"skill": "Go", "category": "Hobbies"},
                {"category": "Databases"},
                "Kafka",
                {"skill": 42},
                {"skill": "Redis", "level": "guru"}
            ]
        });
        let candidates = parse_candidates(&value).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.skill.as_str()).collect();
        assert_eq!(names, vec!["Python", "Redis"]);
        assert_eq!(candidates[1].level, None);
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        assert!(matches!(
            parse_candidates(&json!("Python, Java")),
            Err(EnrichmentUnavailable::Malformed(_))
        ));
        assert!(matches!(
            parse_candidates(&json!({"result": []})),
            Err(EnrichmentUnavailable::Malformed(_))
        ));
        assert!(matches!(
            parse_candidates(&json!({"skills": [{"skill": ""}, 7]})),
            Err(EnrichmentUnavailable::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_batch_is_valid() {
        assert_eq!(parse_candidates(&json!({"skills": []})).unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_missing_enricher_falls_back() {
        let generation = generate_candidates(None, "text", Duration::from_secs(1)).await;
        assert_eq!(
            generation,
            CandidateGeneration::Fallback(EnrichmentUnavailable::NotConfigured)
        );
    }

    #[tokio::test]
    async fn test_successful_enricher_is_used() {
        let enricher = FixedEnricher(vec![Candidate::named("Python")]);
        let generation = generate_candidates(Some(&enricher), "text", Duration::from_secs(1)).await;
        assert_eq!(
            generation,
            CandidateGeneration::Enriched(vec![Candidate::named("Python")])
        );
    }

    #[tokio::test]
    async fn test_failing_enricher_falls_back() {
        let generation =
            generate_candidates(Some(&FailingEnricher), "text", Duration::from_secs(1)).await;
        assert!(matches!(
            generation,
            CandidateGeneration::Fallback(EnrichmentUnavailable::Failed(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_enricher_times_out() {
        let timeout = Duration::from_secs(5);
        let generation = generate_candidates(Some(&SlowEnricher), "text", timeout).await;
        assert_eq!(
            generation,
            CandidateGeneration::Fallback(EnrichmentUnavailable::TimedOut(timeout))
        );
    }
}
