//! Experience Extractor and Level Mapper.
//!
//! `extract_years` looks for a duration phrase around a skill name and returns the number
//! of years; `level_for` turns that number into a proficiency tier.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Proficiency tier inferred from years of experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
            ProficiencyLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown proficiency level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for ProficiencyLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ProficiencyLevel::Beginner),
            "intermediate" => Ok(ProficiencyLevel::Intermediate),
            "advanced" => Ok(ProficiencyLevel::Advanced),
            "expert" => Ok(ProficiencyLevel::Expert),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Maps years of experience to a tier. Upper bounds are inclusive:
/// ≤1 Beginner, ≤4 Intermediate, ≤9 Advanced, above that Expert.
pub fn level_for(years: f64) -> ProficiencyLevel {
    if years.is_nan() || years <= 1.0 {
        ProficiencyLevel::Beginner
    } else if years <= 4.0 {
        ProficiencyLevel::Intermediate
    } else if years <= 9.0 {
        ProficiencyLevel::Advanced
    } else {
        ProficiencyLevel::Expert
    }
}

// A single number, or a range such as "3-5" / "3 to 5". `years` is the first bound.
const DURATION: &str = r"(?P<duration>(?P<years>\d+(?:\.\d+)?)(?:\s*(?:-|–|to)\s*\d+(?:\.\d+)?)?)";
const UNIT: &str = r"\s*\+?\s*(?:years?|yrs?)";
const BEFORE: &str = r"(?:^|[^\w])";
const AFTER: &str = r"(?:[^\w+#]|$)";

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)").expect("static range pattern")
});

/// Pattern templates in priority order; `{s}` is replaced by the escaped skill name.
const PATTERNS: &[&str] = &[
    // "5 years of python", "3 yrs with rust"
    "{d}{u}\\s+(?:of|with|in|using)\\s+{s}{a}",
    // "python: 5 years", "python experience 4 years", "rust - 2 yrs"
    "{b}{s}\\s*(?:experience|expertise)?\\s*[:\\-–]?\\s*{d}{u}",
    // "6 years of professional experience in python", "5 years experience with python"
    "{d}{u}\\s+(?:of\\s+)?(?:professional\\s+|hands-on\\s+|industry\\s+)?(?:experience|expertise)\\s+(?:in|with|using)\\s+{s}{a}",
    // "python (5 years)"
    "{b}{s}\\s*\\(\\s*{d}{u}\\s*\\)",
    // "5+ years python"
    "{d}{u}\\s+{s}{a}",
];

/// The duration patterns of one skill, compiled once and reused for every text.
#[derive(Debug, Clone)]
pub struct ExperiencePatterns {
    patterns: Vec<Regex>,
}

impl ExperiencePatterns {
    pub fn for_skill(skill: &str) -> Result<Self, regex::Error> {
        let skill = regex::escape(&skill.trim().to_lowercase());
        let patterns = PATTERNS
            .iter()
            .map(|template| {
                Regex::new(
                    &template
                        .replace("{d}", DURATION)
                        .replace("{u}", UNIT)
                        .replace("{b}", BEFORE)
                        .replace("{a}", AFTER)
                        .replace("{s}", &skill),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Patterns are tried in a fixed priority order and the first one matching anywhere
    /// wins, regardless of where in the text other patterns would match. A ranged duration
    /// returns the mean of its bounds.
    pub fn extract(&self, text: &str) -> Option<f64> {
        let text = text.to_lowercase();
        let caps = self.patterns.iter().find_map(|re| re.captures(&text))?;

        let duration = caps.name("duration").map(|m| m.as_str()).unwrap_or_default();
        if let Some(range) = RANGE_RE.captures(duration) {
            let low = range[1].parse::<f64>().ok()?;
            let high = range[2].parse::<f64>().ok()?;
            return Some((low + high) / 2.0);
        }
        caps.name("years")?.as_str().parse::<f64>().ok()
    }
}

/// Extracts years of experience with `skill` from `text`, compiling the patterns on the
/// spot. The pipeline keeps compiled `ExperiencePatterns` per taxonomy skill instead.
pub fn extract_years(text: &str, skill: &str) -> Option<f64> {
    if skill.trim().is_empty() {
        return None;
    }
    match ExperiencePatterns::for_skill(skill) {
        Ok(patterns) => patterns.extract(text),
        Err(e) => {
            warn!("Experience patterns for '{skill}' failed to compile: {e}");
            None
        }
    }
}
