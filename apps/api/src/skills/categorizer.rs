//! Categorizer — maps any skill name to a category, never failing.
//!
//! Taxonomy lookups come first (exact, then loose containment in taxonomy order), then
//! keyword heuristics. The containment pass is loose and can pick surprising
//! categories for names that merely contain a short skill ("reactive" contains "r").

use crate::skills::taxonomy::{normalize, SkillCategory, Taxonomy};

const KEYWORD_RULES: &[(&[&str], SkillCategory)] = &[
    (
        &["language", "programming", "code", "script"],
        SkillCategory::ProgrammingLanguages,
    ),
    (
        &["framework", "library", "react", "vue", "angular"],
        SkillCategory::WebFrameworks,
    ),
    (
        &["tool", "docker", "kubernetes", "aws", "cloud", "database"],
        SkillCategory::ToolsTechnologies,
    ),
];

pub fn categorize(taxonomy: &Taxonomy, name: &str) -> SkillCategory {
    let key = normalize(name);
    if key.is_empty() {
        return SkillCategory::SoftSkills;
    }

    if let Some(category) = taxonomy.category_of(&key) {
        return category;
    }

    if let Some(skill) = taxonomy
        .skills()
        .iter()
        .find(|s| key.contains(&s.key) || s.key.contains(&key))
    {
        return skill.category;
    }

    categorize_by_keywords(&key)
}

fn categorize_by_keywords(key: &str) -> SkillCategory {
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| key.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(SkillCategory::SoftSkills)
}
