//! Skill Taxonomy — the closed catalog of canonical skill names, grouped by category.
//!
//! Built once at startup and never mutated. Every lookup is case-insensitive:
//! names are keyed by their trimmed, lowercased form.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed, closed set of categories a skill can belong to.
/// Declaration order is the order categories are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "Programming Languages")]
    ProgrammingLanguages,
    #[serde(rename = "Web Frameworks")]
    WebFrameworks,
    #[serde(rename = "Frontend Technologies")]
    FrontendTechnologies,
    #[serde(rename = "Backend Technologies")]
    BackendTechnologies,
    #[serde(rename = "Databases")]
    Databases,
    #[serde(rename = "Cloud & DevOps")]
    CloudDevOps,
    #[serde(rename = "Tools & Technologies")]
    ToolsTechnologies,
    #[serde(rename = "Testing")]
    Testing,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Data Science & ML")]
    DataScience,
    #[serde(rename = "Big Data")]
    BigData,
    #[serde(rename = "Design & UI/UX")]
    Design,
    #[serde(rename = "Methodologies")]
    Methodologies,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    #[serde(rename = "Other Technologies")]
    OtherTechnologies,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 15] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::WebFrameworks,
        SkillCategory::FrontendTechnologies,
        SkillCategory::BackendTechnologies,
        SkillCategory::Databases,
        SkillCategory::CloudDevOps,
        SkillCategory::ToolsTechnologies,
        SkillCategory::Testing,
        SkillCategory::MobileDevelopment,
        SkillCategory::DataScience,
        SkillCategory::BigData,
        SkillCategory::Design,
        SkillCategory::Methodologies,
        SkillCategory::SoftSkills,
        SkillCategory::OtherTechnologies,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming Languages",
            SkillCategory::WebFrameworks => "Web Frameworks",
            SkillCategory::FrontendTechnologies => "Frontend Technologies",
            SkillCategory::BackendTechnologies => "Backend Technologies",
            SkillCategory::Databases => "Databases",
            SkillCategory::CloudDevOps => "Cloud & DevOps",
            SkillCategory::ToolsTechnologies => "Tools & Technologies",
            SkillCategory::Testing => "Testing",
            SkillCategory::MobileDevelopment => "Mobile Development",
            SkillCategory::DataScience => "Data Science & ML",
            SkillCategory::BigData => "Big Data",
            SkillCategory::Design => "Design & UI/UX",
            SkillCategory::Methodologies => "Methodologies",
            SkillCategory::SoftSkills => "Soft Skills",
            SkillCategory::OtherTechnologies => "Other Technologies",
        }
    }

    /// Case-insensitive lookup by label. Returns `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TaxonomyError {
    #[error("Skill '{skill}' is listed under both {first} and {second}")]
    AmbiguousSkill {
        skill: String,
        first: SkillCategory,
        second: SkillCategory,
    },

    #[error("Category {0} has no skills")]
    EmptyCategory(SkillCategory),

    #[error("Skill '{skill}' is listed twice under {category}")]
    DuplicateSkill {
        skill: String,
        category: SkillCategory,
    },

    #[error("Alias '{alias}' points at unknown skill '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Alias '{alias}' collides with skill '{existing}'")]
    AliasCollision { alias: String, existing: String },
}

/// A single canonical skill.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    /// Display form, case preserved.
    pub name: String,
    /// Trimmed, lowercased form used for every comparison.
    pub key: String,
    pub category: SkillCategory,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    skills: Vec<Skill>,
    categories: Vec<SkillCategory>,
    by_key: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

/// Normalized comparison key for a skill name or alias.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Taxonomy {
    /// Builds a taxonomy from `category → canonical names` plus `(alias, target)` pairs.
    pub fn new(
        categories: &[(SkillCategory, &[&str])],
        aliases: &[(&str, &str)],
    ) -> Result<Self, TaxonomyError> {
        let mut skills: Vec<Skill> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<SkillCategory> = Vec::new();

        for &(category, names) in categories {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err(TaxonomyError::EmptyCategory(category));
            }
            if !order.contains(&category) {
                order.push(category);
            }

            for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
                let key = normalize(name);
                if let Some(&existing) = by_key.get(&key) {
                    let first = skills[existing].category;
                    return Err(if first == category {
                        TaxonomyError::DuplicateSkill {
                            skill: name.to_string(),
                            category,
                        }
                    } else {
                        TaxonomyError::AmbiguousSkill {
                            skill: name.to_string(),
                            first,
                            second: category,
                        }
                    });
                }
                by_key.insert(key.clone(), skills.len());
                skills.push(Skill {
                    name: name.to_string(),
                    key,
                    category,
                    aliases: Vec::new(),
                });
            }
        }

        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for &(alias, target) in aliases {
            let alias_key = normalize(alias);
            let target_idx = *by_key.get(&normalize(target)).ok_or_else(|| {
                TaxonomyError::UnknownAliasTarget {
                    alias: alias.to_string(),
                    target: target.to_string(),
                }
            })?;

            let clash = by_key
                .get(&alias_key)
                .or_else(|| by_alias.get(&alias_key))
                .copied();
            if let Some(idx) = clash {
                if idx != target_idx || by_key.contains_key(&alias_key) {
                    return Err(TaxonomyError::AliasCollision {
                        alias: alias.to_string(),
                        existing: skills[idx].name.clone(),
                    });
                }
                continue;
            }

            by_alias.insert(alias_key.clone(), target_idx);
            skills[target_idx].aliases.push(alias_key);
        }

        Ok(Self {
            skills,
            categories: order,
            by_key,
            by_alias,
        })
    }

    /// Normalized names of every canonical skill, in taxonomy order.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.key.as_str())
    }

    /// Every canonical skill, in taxonomy order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Categories in the order they were declared.
    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Canonical skill by name (any casing). Aliases are not consulted.
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.by_key.get(&normalize(name)).map(|&i| &self.skills[i])
    }

    pub fn category_of(&self, name: &str) -> Option<SkillCategory> {
        self.get(name).map(|s| s.category)
    }

    pub fn aliases_of(&self, name: &str) -> &[String] {
        self.get(name).map(|s| s.aliases.as_slice()).unwrap_or(&[])
    }

    /// Resolves a canonical name or an alias to its canonical skill.
    pub fn resolve(&self, name_or_alias: &str) -> Option<&Skill> {
        let key = normalize(name_or_alias);
        self.by_key
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .map(|&i| &self.skills[i])
    }

    /// Display form of the canonical skill behind `name_or_alias`.
    pub fn canonical(&self, name_or_alias: &str) -> Option<&str> {
        self.resolve(name_or_alias).map(|s| s.name.as_str())
    }

    /// Canonical skills of one category, in declaration order.
    pub fn skills_in(&self, category: SkillCategory) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Taxonomy {
        Taxonomy::new(
            &[
                (SkillCategory::ProgrammingLanguages, &["Java", "JavaScript", "R"]),
                (SkillCategory::WebFrameworks, &["React"]),
            ],
            &[("js", "JavaScript"), ("ECMAScript", "javascript")],
        )
        .unwrap()
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let t = small();
        assert!(t.get("JAVASCRIPT").is_some());
        assert_eq!(t.get("  react ").map(|s| s.name.as_str()), Some("React"));
        assert_eq!(t.category_of("java"), Some(SkillCategory::ProgrammingLanguages));
        assert_eq!(t.category_of("React"), Some(SkillCategory::WebFrameworks));
        assert_eq!(t.category_of("Rust"), None);
    }

    #[test]
    fn test_all_skills_are_normalized_in_order() {
        let t = small();
        let all: Vec<&str> = t.all_skills().collect();
        assert_eq!(all, vec!["java", "javascript", "r", "react"]);
    }

    #[test]
    fn test_aliases_resolve_to_canonical_display_name() {
        let t = small();
        assert_eq!(t.aliases_of("JavaScript"), &["js".to_string(), "ecmascript".to_string()]);
        assert_eq!(t.resolve("JS").map(|s| s.name.as_str()), Some("JavaScript"));
        assert_eq!(t.resolve("react").map(|s| s.name.as_str()), Some("React"));
        assert!(t.resolve("script").is_none());
        assert_eq!(t.canonical("ECMASCRIPT"), Some("JavaScript"));
        assert_eq!(t.canonical("java"), Some("Java"));
        assert!(t.aliases_of("Unknown").is_empty());
    }

    #[test]
    fn test_same_skill_under_two_categories_is_ambiguous() {
        let err = Taxonomy::new(
            &[
                (SkillCategory::ProgrammingLanguages, &["Go"]),
                (SkillCategory::CloudDevOps, &["go"]),
            ],
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::AmbiguousSkill { .. }));
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let err = Taxonomy::new(&[(SkillCategory::Testing, &[])], &[]).unwrap_err();
        assert_eq!(err, TaxonomyError::EmptyCategory(SkillCategory::Testing));

        let err = Taxonomy::new(&[(SkillCategory::Testing, &["  "])], &[]).unwrap_err();
        assert_eq!(err, TaxonomyError::EmptyCategory(SkillCategory::Testing));
    }

    #[test]
    fn test_duplicate_within_category_is_rejected() {
        let err =
            Taxonomy::new(&[(SkillCategory::Databases, &["Redis", "REDIS"])], &[]).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateSkill { .. }));
    }

    #[test]
    fn test_alias_to_unknown_skill_is_rejected() {
        let err = Taxonomy::new(&[(SkillCategory::Databases, &["Redis"])], &[("pg", "Postgres")])
            .unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownAliasTarget { .. }));
    }

    #[test]
    fn test_alias_shadowing_a_canonical_name_is_rejected() {
        let err = Taxonomy::new(
            &[(SkillCategory::ProgrammingLanguages, &["Java", "JavaScript"])],
            &[("java", "JavaScript")],
        )
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::AliasCollision { .. }));
    }

    #[test]
    fn test_repeated_alias_for_same_target_is_ignored() {
        let t = Taxonomy::new(
            &[(SkillCategory::ProgrammingLanguages, &["Go"])],
            &[("golang", "Go"), ("GoLang", "go")],
        )
        .unwrap();
        assert_eq!(t.aliases_of("go"), &["golang".to_string()]);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in SkillCategory::ALL {
            assert_eq!(SkillCategory::from_label(category.label()), Some(category));
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
        assert_eq!(
            SkillCategory::from_label("cloud & devops"),
            Some(SkillCategory::CloudDevOps)
        );
        assert_eq!(SkillCategory::from_label("Hobbies"), None);
    }
}
