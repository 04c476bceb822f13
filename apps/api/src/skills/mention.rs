//! Mention Detector — decides whether a taxonomy skill is genuinely referenced in text.
//!
//! Rules, in order, stopping at the first decisive one:
//! 1. closed-world whitelist: only taxonomy skills can be mentioned;
//! 2. conflict suppression: occurrences of a longer skill that embeds this one are owned
//!    by the longer skill and do not count;
//! 3. single-letter skills need a standalone match and lose to their disambiguation terms;
//! 4. any alias matching as a whole word is a mention, unless the match sits inside a
//!    longer name of another skill ("js" in "node.js");
//! 5. multi-word skills match as a contiguous whole-word sequence;
//! 6. otherwise an exact whole-word match. There is no substring fallback.

use crate::skills::conflicts::ConflictMap;
use crate::skills::matching::{contains_word, mask_spans, normalize_text, word_matches};
use crate::skills::taxonomy::{normalize, Skill, Taxonomy};

/// Longer terms that take precedence over a single-letter skill when present as a word.
const SINGLE_LETTER_CONFLICTS: &[(&str, &[&str])] = &[
    ("r", &["react", "ruby", "rust", "rails", "javascript"]),
    ("c", &["c++", "c#", "css", "objective-c"]),
    ("s", &["swift", "scala", "sql"]),
];

/// Text lowercased with whitespace runs collapsed, prepared once per pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self(normalize_text(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct MentionDetector<'a> {
    taxonomy: &'a Taxonomy,
    conflicts: &'a ConflictMap,
}

impl<'a> MentionDetector<'a> {
    pub fn new(taxonomy: &'a Taxonomy, conflicts: &'a ConflictMap) -> Self {
        Self {
            taxonomy,
            conflicts,
        }
    }

    /// Convenience wrapper that normalizes `text` on every call.
    pub fn is_mentioned(&self, text: &str, skill: &str) -> bool {
        self.is_mentioned_in(&NormalizedText::new(text), skill)
    }

    pub fn is_mentioned_in(&self, text: &NormalizedText, skill: &str) -> bool {
        let Some(entry) = self.taxonomy.get(skill) else {
            return false;
        };
        let text = text.as_str();
        let key = entry.key.as_str();

        let owners: Vec<&str> = self
            .conflicts
            .owners_of(key)
            .iter()
            .map(String::as_str)
            .collect();
        if !self.mentioned_outside(text, entry, &owners) {
            return false;
        }

        if key.chars().count() == 1 {
            return contains_word(text, key) && !single_letter_blocked(text, key);
        }

        if entry
            .aliases
            .iter()
            .any(|alias| self.alias_mentioned(text, alias))
        {
            return true;
        }

        if key.contains(char::is_whitespace) {
            return contains_word(text, &collapse(key));
        }

        contains_word(text, key)
    }

    /// True unless every whole-word occurrence of `skill` (or its aliases) sits inside a
    /// whole-word occurrence of one of `owners`.
    ///
    /// When none of the owners occurs in `text` nothing is claimed and the skill is left to
    /// the remaining rules.
    pub fn mentioned_outside(&self, text: &str, skill: &Skill, owners: &[&str]) -> bool {
        let spans: Vec<_> = owners
            .iter()
            .flat_map(|owner| word_matches(text, &collapse(owner)))
            .collect();
        if spans.is_empty() {
            return true;
        }

        let masked = mask_spans(text, &spans);
        std::iter::once(skill.key.as_str())
            .chain(skill.aliases.iter().map(String::as_str))
            .any(|form| contains_word(&masked, &collapse(form)))
    }

    fn alias_mentioned(&self, text: &str, alias: &str) -> bool {
        let alias = collapse(alias);
        let spans: Vec<_> = self
            .conflicts
            .alias_owners_of(&alias)
            .iter()
            .flat_map(|owner| word_matches(text, &collapse(owner)))
            .collect();
        if spans.is_empty() {
            return contains_word(text, &alias);
        }
        contains_word(&mask_spans(text, &spans), &alias)
    }
}

fn single_letter_blocked(text: &str, letter: &str) -> bool {
    SINGLE_LETTER_CONFLICTS
        .iter()
        .find(|(l, _)| *l == letter)
        .is_some_and(|(_, terms)| terms.iter().any(|t| contains_word(text, t)))
}

fn collapse(name: &str) -> String {
    normalize(name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
