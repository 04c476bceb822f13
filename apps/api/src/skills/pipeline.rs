//! Extraction Pipeline — turns free-form text into a deduplicated, categorized skill list.
//!
//! candidate generation → mention validation → post-hoc substring filter →
//! experience/level → categorization → dedup → category grouping.
//!
//! The engine is synchronous and immutable once built; the only async step is the optional
//! enrichment call in `extract_with_enrichment`, which is resolved into a
//! `CandidateGeneration` before `run` sees it.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::skills::catalog::default_taxonomy;
use crate::skills::categorizer::categorize;
use crate::skills::conflicts::{is_embedded, ConflictMap};
use crate::skills::enrichment::{generate_candidates, EnrichmentUnavailable, SkillEnricher};
use crate::skills::experience::{level_for, ExperiencePatterns, ProficiencyLevel};
use crate::skills::mention::{MentionDetector, NormalizedText};
use crate::skills::taxonomy::{normalize, Skill, SkillCategory, Taxonomy, TaxonomyError};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// An unvalidated skill suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub skill: String,
    pub category: Option<SkillCategory>,
    pub level: Option<ProficiencyLevel>,
}

impl Candidate {
    pub fn named(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            category: None,
            level: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub skill: String,
    pub category: SkillCategory,
    pub level: ProficiencyLevel,
    pub experience_years: Option<f64>,
}

impl ExtractedSkill {
    /// "Python - 4 years", "Go - 2.5 years", or just "Python" when no duration was found.
    pub fn summary_line(&self) -> String {
        match self.experience_years {
            Some(years) if years.fract() == 0.0 => format!("{} - {years:.0} years", self.skill),
            Some(years) => format!("{} - {years} years", self.skill),
            None => self.skill.clone(),
        }
    }
}

/// Where the candidates of a run came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Enrichment,
    #[default]
    TaxonomyScan,
}

/// Outcome of the optional enrichment step.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateGeneration {
    Enriched(Vec<Candidate>),
    Fallback(EnrichmentUnavailable),
}

impl CandidateGeneration {
    pub fn source(&self) -> CandidateSource {
        match self {
            CandidateGeneration::Enriched(_) => CandidateSource::Enrichment,
            CandidateGeneration::Fallback(_) => CandidateSource::TaxonomyScan,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillReport {
    pub skills: Vec<ExtractedSkill>,
    /// Skill names per category, categories in enum order, names in output order.
    pub categories: BTreeMap<SkillCategory, Vec<String>>,
    pub source: CandidateSource,
}

impl SkillReport {
    fn new(skills: Vec<ExtractedSkill>, source: CandidateSource) -> Self {
        let mut categories: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
        for s in &skills {
            categories.entry(s.category).or_default().push(s.skill.clone());
        }
        Self {
            skills,
            categories,
            source,
        }
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.skill.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Taxonomy plus its derived conflict map. Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillEngine {
    taxonomy: Taxonomy,
    conflicts: ConflictMap,
    /// skill key → duration patterns, compiled on first use
    experience: HashMap<String, OnceCell<ExperiencePatterns>>,
}

struct Survivor<'t> {
    entry: &'t Skill,
    extracted: ExtractedSkill,
}

impl SkillEngine {
    pub fn new(taxonomy: Taxonomy) -> Self {
        let conflicts = ConflictMap::build(&taxonomy);
        let experience = taxonomy
            .all_skills()
            .map(|key| (key.to_string(), OnceCell::new()))
            .collect();
        Self {
            taxonomy,
            conflicts,
            experience,
        }
    }

    pub fn with_default_catalog() -> Result<Self, TaxonomyError> {
        Ok(Self::new(default_taxonomy()?))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn conflicts(&self) -> &ConflictMap {
        &self.conflicts
    }

    pub fn detector(&self) -> MentionDetector<'_> {
        MentionDetector::new(&self.taxonomy, &self.conflicts)
    }

    pub fn categorize(&self, name: &str) -> SkillCategory {
        categorize(&self.taxonomy, name)
    }

    /// Years of experience with a taxonomy skill, using its cached patterns.
    pub fn experience_years(&self, text: &str, skill: &Skill) -> Option<f64> {
        let cell = self.experience.get(&skill.key)?;
        match cell.get_or_try_init(|| ExperiencePatterns::for_skill(&skill.name)) {
            Ok(patterns) => patterns.extract(text),
            Err(e) => {
                warn!("Experience patterns for '{}' failed to compile: {e}", skill.name);
                None
            }
        }
    }

    /// Taxonomy-scan extraction, no enrichment.
    pub fn extract_skills(&self, text: &str) -> SkillReport {
        self.run(
            text,
            CandidateGeneration::Fallback(EnrichmentUnavailable::NotConfigured),
        )
    }

    /// Asks `enricher` for candidates (bounded by `timeout`) and falls back to the taxonomy
    /// scan when it is absent or unavailable. Blank text never reaches the enricher.
    pub async fn extract_with_enrichment(
        &self,
        text: &str,
        enricher: Option<&dyn SkillEnricher>,
        timeout: Duration,
    ) -> SkillReport {
        if text.trim().is_empty() {
            return SkillReport::default();
        }
        let generation = generate_candidates(enricher, text, timeout).await;
        self.run(text, generation)
    }

    /// Every canonical skill occurring anywhere in `text` as a substring, in taxonomy order.
    /// Coarse; the mention detector does the real filtering.
    pub fn scan_candidates(&self, text: &NormalizedText) -> Vec<Candidate> {
        self.taxonomy
            .skills()
            .iter()
            .filter(|s| text.as_str().contains(&s.key))
            .map(|s| Candidate::named(s.name.clone()))
            .collect()
    }

    pub fn run(&self, text: &str, generation: CandidateGeneration) -> SkillReport {
        let source = generation.source();
        let text = NormalizedText::new(text);
        if text.is_empty() {
            return SkillReport::new(Vec::new(), source);
        }

        let candidates = match generation {
            CandidateGeneration::Enriched(candidates) => candidates,
            CandidateGeneration::Fallback(reason) => {
                debug!("Scanning taxonomy for candidates ({reason})");
                self.scan_candidates(&text)
            }
        };
        let candidate_count = candidates.len();

        let detector = self.detector();
        let survivors: Vec<Survivor<'_>> = candidates
            .into_iter()
            .filter_map(|candidate| self.validate(&detector, &text, candidate))
            .collect();
        let validated = survivors.len();

        let survivors = drop_embedded(&detector, &text, survivors);
        let skills = dedup_skills(survivors.into_iter().map(|s| s.extracted).collect());

        debug!(
            "Skill extraction: {} candidates, {} validated, {} reported",
            candidate_count,
            validated,
            skills.len()
        );

        SkillReport::new(skills, source)
    }

    fn validate<'t>(
        &'t self,
        detector: &MentionDetector<'_>,
        text: &NormalizedText,
        candidate: Candidate,
    ) -> Option<Survivor<'t>> {
        let Some(entry) = self.taxonomy.resolve(&candidate.skill) else {
            debug!("Dropping '{}': not in taxonomy", candidate.skill);
            return None;
        };
        if !detector.is_mentioned_in(text, &entry.name) {
            debug!("Dropping '{}': no genuine mention", entry.name);
            return None;
        }

        let experience_years = self.experience_years(text.as_str(), entry);
        let level = experience_years
            .map(level_for)
            .or(candidate.level)
            .unwrap_or_default();
        let category = candidate
            .category
            .unwrap_or_else(|| self.categorize(&entry.name));

        Some(Survivor {
            entry,
            extracted: ExtractedSkill {
                skill: entry.name.clone(),
                category,
                level,
                experience_years,
            },
        })
    }
}

/// Drops a survivor whose name is embedded in another survivor's name, unless it also has a
/// whole-word mention outside the longer survivors' spans.
fn drop_embedded<'t>(
    detector: &MentionDetector<'_>,
    text: &NormalizedText,
    survivors: Vec<Survivor<'t>>,
) -> Vec<Survivor<'t>> {
    let keys: Vec<&str> = survivors.iter().map(|s| s.entry.key.as_str()).collect();

    survivors
        .into_iter()
        .filter(|s| {
            let owners: Vec<&str> = keys
                .iter()
                .copied()
                .filter(|long| is_embedded(&s.entry.key, long))
                .collect();
            if owners.is_empty() {
                return true;
            }
            let keep = detector.mentioned_outside(text.as_str(), s.entry, &owners);
            if !keep {
                debug!("Dropping '{}': embedded in {:?}", s.entry.name, owners);
            }
            keep
        })
        .collect()
}

/// Collapses same-named skills at the position of their first appearance, keeping the
/// entry with more experience years. Ties keep the first.
fn dedup_skills(skills: Vec<ExtractedSkill>) -> Vec<ExtractedSkill> {
    let mut out: Vec<ExtractedSkill> = Vec::with_capacity(skills.len());
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();

    for skill in skills {
        let key = normalize(&skill.skill);
        match positions.get(&key) {
            Some(&i) => {
                if more_experienced(&skill, &out[i]) {
                    out[i] = skill;
                }
            }
            None => {
                positions.insert(key, out.len());
                out.push(skill);
            }
        }
    }

    out
}

fn more_experienced(candidate: &ExtractedSkill, current: &ExtractedSkill) -> bool {
    match (candidate.experience_years, current.experience_years) {
        (Some(a), Some(b)) => a > b,
        (Some(_), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SkillEngine {
        SkillEngine::with_default_catalog().unwrap()
    }

    fn names(report: &SkillReport) -> Vec<&str> {
        report.skills.iter().map(|s| s.skill.as_str()).collect()
    }

    fn extracted(skill: &str, years: Option<f64>) -> ExtractedSkill {
        ExtractedSkill {
            skill: skill.to_string(),
            category: SkillCategory::ProgrammingLanguages,
            level: years.map(level_for).unwrap_or_default(),
            experience_years: years,
        }
    }

    #[test]
    fn test_java_and_javascript_are_both_reported() {
        let report = engine().extract_skills("I know Java and JavaScript");
        assert_eq!(names(&report), vec!["JavaScript", "Java"]);
    }

    #[test]
    fn test_react_does_not_yield_r() {
        let report = engine().extract_skills("I use React for frontend development");
        assert_eq!(names(&report), vec!["React"]);
    }

    #[test]
    fn test_typescript_yields_no_fragments() {
        let report = engine().extract_skills("I work with TypeScript");
        assert_eq!(names(&report), vec!["TypeScript"]);
    }

    #[test]
    fn test_experience_sets_level() {
        let report = engine().extract_skills("I have 5 years of JavaScript experience");
        assert_eq!(report.skills.len(), 1);
        let js = &report.skills[0];
        assert_eq!(js.skill, "JavaScript");
        assert_eq!(js.level, ProficiencyLevel::Advanced);
        assert_eq!(js.experience_years, Some(5.0));
        assert_eq!(js.category, SkillCategory::ProgrammingLanguages);
    }

    #[test]
    fn test_embedded_short_skill_absent_when_only_long_occurs() {
        let e = engine();
        for (text, short) in [
            ("Built apps with SwiftUI", "Swift"),
            ("Data stored in MongoDB", "Go"),
            ("Pipelines in JavaScript", "Java"),
        ] {
            let report = e.extract_skills(text);
            assert!(
                !names(&report).contains(&short),
                "{short} should be suppressed in {text:?}: {:?}",
                names(&report)
            );
        }
    }

    #[test]
    fn test_empty_text_yields_empty_report() {
        let e = engine();
        assert!(e.extract_skills("").is_empty());
        assert!(e.extract_skills("   \n\t ").is_empty());
        assert!(e.extract_skills("").categories.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let e = engine();
        let text = "Senior engineer: 6 years of Python, Docker (3 years), some R and SQL. \
                    Shipped React Native apps and REST APIs on AWS.";
        let first = e.extract_skills(text);
        let second = e.extract_skills(text);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_categories_grouped_in_enum_order() {
        let report = engine().extract_skills("PostgreSQL, Docker and Python");
        let order: Vec<SkillCategory> = report.categories.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                SkillCategory::ProgrammingLanguages,
                SkillCategory::Databases,
                SkillCategory::CloudDevOps,
            ]
        );
        assert_eq!(report.categories[&SkillCategory::Databases], vec!["PostgreSQL"]);
    }

    #[test]
    fn test_enriched_candidates_are_validated() {
        let e = engine();
        let generation = CandidateGeneration::Enriched(vec![
            Candidate::named("Java"),
            Candidate {
                skill: "JavaScript".into(),
                category: None,
                level: Some(ProficiencyLevel::Expert),
            },
            Candidate::named("Zig"),
        ]);
        let report = e.run("5 years of JavaScript", generation);

        assert_eq!(report.source, CandidateSource::Enrichment);
        assert_eq!(names(&report), vec!["JavaScript"]);
        // extracted years beat the suggested level
        assert_eq!(report.skills[0].level, ProficiencyLevel::Advanced);
    }

    #[test]
    fn test_enriched_level_and_category_are_used_when_text_is_silent() {
        let e = engine();
        let generation = CandidateGeneration::Enriched(vec![Candidate {
            skill: "Kafka".into(),
            category: Some(SkillCategory::BackendTechnologies),
            level: Some(ProficiencyLevel::Expert),
        }]);
        let report = e.run("Streaming pipelines on Kafka", generation);
        let kafka = &report.skills[0];
        assert_eq!(kafka.level, ProficiencyLevel::Expert);
        assert_eq!(kafka.category, SkillCategory::BackendTechnologies);
        assert_eq!(kafka.experience_years, None);
    }

    #[test]
    fn test_enriched_aliases_resolve_and_dedup() {
        let e = engine();
        let generation = CandidateGeneration::Enriched(vec![
            Candidate::named("js"),
            Candidate::named("JavaScript"),
            Candidate::named("golang"),
        ]);
        let report = e.run("Mostly JS, some golang", generation);
        assert_eq!(names(&report), vec!["JavaScript", "Go"]);
    }

    #[test]
    fn test_enriched_language_inside_framework_name_is_dropped() {
        let e = engine();
        let generation = CandidateGeneration::Enriched(vec![
            Candidate::named("Node.js"),
            Candidate::named("JavaScript"),
        ]);
        let report = e.run("Built REST APIs with Node.js", generation);
        assert_eq!(names(&report), vec!["Node.js"]);
    }

    #[test]
    fn test_experience_patterns_compiled_once_per_skill() {
        let e = engine();
        let python = e.taxonomy().get("Python").unwrap();
        assert!(e.experience["python"].get().is_none());

        assert_eq!(e.experience_years("5 years experience with Python", python), Some(5.0));
        assert!(e.experience["python"].get().is_some());
        assert_eq!(e.experience_years("Python (2 years)", python), Some(2.0));

        let report = e.extract_skills("5 years experience with Python");
        assert_eq!(report.skills[0].experience_years, Some(5.0));
        assert_eq!(report.skills[0].level, ProficiencyLevel::Advanced);
    }

    #[test]
    fn test_empty_enrichment_reports_nothing() {
        let report = engine().run("Python developer", CandidateGeneration::Enriched(vec![]));
        assert!(report.is_empty());
        assert_eq!(report.source, CandidateSource::Enrichment);
    }

    #[test]
    fn test_fallback_reports_taxonomy_scan() {
        let report = engine().run(
            "Python developer",
            CandidateGeneration::Fallback(EnrichmentUnavailable::Malformed("bad".into())),
        );
        assert_eq!(names(&report), vec!["Python"]);
        assert_eq!(report.source, CandidateSource::TaxonomyScan);
    }

    #[test]
    fn test_drop_embedded_keeps_independent_mentions() {
        let e = engine();
        let detector = e.detector();
        let survivors = |text: &NormalizedText| -> Vec<String> {
            let entries: Vec<Survivor<'_>> = ["Java", "JavaScript"]
                .iter()
                .map(|n| Survivor {
                    entry: e.taxonomy().get(n).unwrap(),
                    extracted: extracted(n, None),
                })
                .collect();
            drop_embedded(&detector, text, entries)
                .into_iter()
                .map(|s| s.extracted.skill)
                .collect()
        };

        assert_eq!(
            survivors(&NormalizedText::new("javascript only")),
            vec!["JavaScript"]
        );
        assert_eq!(
            survivors(&NormalizedText::new("java and javascript")),
            vec!["Java", "JavaScript"]
        );
    }

    #[test]
    fn test_dedup_keeps_higher_experience_at_first_position() {
        let skills = vec![
            extracted("Python", Some(2.0)),
            extracted("Go", None),
            extracted("python", Some(6.0)),
            extracted("Go", Some(1.0)),
            extracted("Rust", Some(3.0)),
            extracted("Rust", Some(3.0)),
        ];
        let deduped = dedup_skills(skills);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].experience_years, Some(6.0));
        assert_eq!(deduped[1].skill, "Go");
        assert_eq!(deduped[1].experience_years, Some(1.0));
        assert_eq!(deduped[2].skill, "Rust");
    }

    #[test]
    fn test_repeated_sections_do_not_duplicate_skills() {
        let text = "SKILLS\nPython, Docker\n\nPython, Docker\nI wrote Python daily.";
        let report = engine().extract_skills(text);
        assert_eq!(names(&report), vec!["Python", "Docker"]);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(extracted("Python", Some(4.0)).summary_line(), "Python - 4 years");
        assert_eq!(extracted("Go", Some(2.5)).summary_line(), "Go - 2.5 years");
        assert_eq!(extracted("Rust", None).summary_line(), "Rust");
    }

    #[test]
    fn test_report_serializes_category_labels() {
        let report = engine().extract_skills("Python");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["categories"]["Programming Languages"][0], "Python");
        assert_eq!(json["source"], "taxonomy_scan");
        assert_eq!(json["skills"][0]["level"], "Intermediate");
        assert!(json["skills"][0]["experience_years"].is_null());
    }

    #[tokio::test]
    async fn test_blank_text_skips_enrichment() {
        let report = engine()
            .extract_with_enrichment("  ", None, Duration::from_secs(1))
            .await;
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_missing_enricher_scans_taxonomy() {
        let report = engine()
            .extract_with_enrichment("Rust and Go", None, Duration::from_secs(1))
            .await;
        assert_eq!(names(&report), vec!["Go", "Rust"]);
        assert_eq!(report.source, CandidateSource::TaxonomyScan);
    }
}
