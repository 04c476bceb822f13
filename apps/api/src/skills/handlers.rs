//! Axum route handlers for the Skills API.

use std::collections::{BTreeMap, HashSet};

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::skills::pipeline::{CandidateSource, ExtractedSkill, SkillReport};
use crate::skills::taxonomy::{normalize, SkillCategory};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    #[serde(flatten)]
    pub report: SkillReport,
    pub skill_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct TestExtractionRequest {
    pub text: String,
    #[serde(default)]
    pub expected_skills: Option<Vec<String>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionComparison {
    pub matches_expected: bool,
    pub expected_count: usize,
    pub extracted_count: usize,
    pub matches: Vec<String>,
    pub missing_skills: Vec<String>,
    pub unexpected_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TestExtractionResponse {
    pub extracted_skills: Vec<ExtractedSkill>,
    pub extracted_skill_names: Vec<String>,
    pub extraction_count: usize,
    pub categories: BTreeMap<SkillCategory, Vec<String>>,
    pub source: CandidateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ExtractionComparison>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomySkill {
    pub name: String,
    pub aliases: Vec<String>,
    /// Shorter skills whose names occur inside this one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyCategory {
    pub category: SkillCategory,
    pub skills: Vec<TaxonomySkill>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: Vec<TaxonomyCategory>,
    pub skill_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills/taxonomy
///
/// Lists every category with its canonical skills, their aliases and the shorter skills
/// each name embeds.
pub async fn handle_get_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    let taxonomy = state.engine.taxonomy();
    let conflicts = state.engine.conflicts();

    let categories = taxonomy
        .categories()
        .iter()
        .map(|&category| TaxonomyCategory {
            category,
            skills: taxonomy
                .skills_in(category)
                .map(|s| TaxonomySkill {
                    name: s.name.clone(),
                    aliases: s.aliases.clone(),
                    embeds: conflicts
                        .conflicts_of(&s.key)
                        .into_iter()
                        .flatten()
                        .filter_map(|short| taxonomy.canonical(short))
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Json(TaxonomyResponse {
        categories,
        skill_count: taxonomy.len(),
    })
}

/// POST /api/v1/skills/extract
///
/// Extracts skills from free-form text. Blank text is a valid, empty result.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let report = state.extract(&request.text).await;

    Ok(Json(ExtractResponse {
        skill_count: report.skills.len(),
        report,
    }))
}

/// POST /api/v1/skills/test-extraction
///
/// Verification endpoint: runs extraction and, when `expected_skills` is given, reports
/// which expectations were met (case-insensitive). Expected aliases such as "js" are
/// compared under their canonical name.
pub async fn handle_test_extraction(
    State(state): State<AppState>,
    Json(request): Json<TestExtractionRequest>,
) -> Result<Json<TestExtractionResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let report = state.extract(&request.text).await;
    let names = report.skill_names();

    let taxonomy = state.engine.taxonomy();
    let comparison = request.expected_skills.as_deref().map(|expected| {
        let expected: Vec<String> = expected
            .iter()
            .map(|s| taxonomy.canonical(s).map_or_else(|| s.clone(), str::to_string))
            .collect();
        compare_with_expected(&names, &expected)
    });

    info!(
        user_id = request.user_id.as_deref().unwrap_or("anonymous"),
        extracted = names.len(),
        matches_expected = comparison.as_ref().map(|c| c.matches_expected),
        "Test extraction completed"
    );

    Ok(Json(TestExtractionResponse {
        extraction_count: names.len(),
        extracted_skill_names: names,
        extracted_skills: report.skills,
        categories: report.categories,
        source: report.source,
        comparison,
    }))
}

/// Case-insensitive comparison of extracted skill names against an expected list.
/// `matches` and `missing_skills` follow the expected order, `unexpected_skills` the
/// extracted order.
pub fn compare_with_expected(extracted: &[String], expected: &[String]) -> ExtractionComparison {
    let extracted_keys: HashSet<String> = extracted.iter().map(|s| normalize(s)).collect();
    let expected_keys: HashSet<String> = expected.iter().map(|s| normalize(s)).collect();

    let (matches, missing_skills): (Vec<String>, Vec<String>) = expected
        .iter()
        .cloned()
        .partition(|s| extracted_keys.contains(&normalize(s)));

    let unexpected_skills: Vec<String> = extracted
        .iter()
        .filter(|s| !expected_keys.contains(&normalize(s)))
        .cloned()
        .collect();

    ExtractionComparison {
        matches_expected: missing_skills.is_empty() && unexpected_skills.is_empty(),
        expected_count: expected.len(),
        extracted_count: extracted.len(),
        matches,
        missing_skills,
        unexpected_skills,
    }
}
