//! Conflict Map — which skill names are embedded inside other skill names.
//!
//! A short name is embedded in a long name when it occurs in it without a clean word
//! boundary at its first occurrence: "java" in "javascript", "r" in "react". The rule only
//! inspects the side of the occurrence that does not touch the start of the long name, so
//! "go" inside "mongodb" counts as well. That over-suppression is kept as-is.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::skills::taxonomy::Taxonomy;

/// Returns true when `short` occurs inside `long` without a word boundary.
///
/// With `idx` the first occurrence of `short` in `long` (both lowercased):
/// - `idx == 0`: embedded when the character right after the occurrence is alphabetic;
/// - `idx > 0`: embedded when the character right before the occurrence is alphabetic.
pub fn is_embedded(short: &str, long: &str) -> bool {
    let short = short.to_lowercase();
    let long = long.to_lowercase();
    if short.is_empty() || short == long {
        return false;
    }

    let Some(idx) = long.find(&short) else {
        return false;
    };

    if idx == 0 {
        long[short.len()..]
            .chars()
            .next()
            .is_some_and(char::is_alphabetic)
    } else {
        long[..idx]
            .chars()
            .next_back()
            .is_some_and(char::is_alphabetic)
    }
}

/// Precomputed, read-only conflict relation over the whole taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ConflictMap {
    /// long → short names it embeds
    by_long: BTreeMap<String, BTreeSet<String>>,
    /// short → long names embedding it, in taxonomy order
    by_short: HashMap<String, Vec<String>>,
    /// alias → longer names or aliases of other skills that contain it
    by_alias: HashMap<String, Vec<String>>,
}

impl ConflictMap {
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let keys: Vec<&str> = taxonomy.all_skills().collect();
        let mut map = Self::default();

        for &long in &keys {
            for &short in &keys {
                if long != short && is_embedded(short, long) {
                    map.by_long
                        .entry(long.to_string())
                        .or_default()
                        .insert(short.to_string());
                    map.by_short
                        .entry(short.to_string())
                        .or_default()
                        .push(long.to_string());
                }
            }
        }

        let forms: Vec<(&str, &str)> = taxonomy
            .skills()
            .iter()
            .flat_map(|s| {
                std::iter::once((s.key.as_str(), s.key.as_str()))
                    .chain(s.aliases.iter().map(move |a| (s.key.as_str(), a.as_str())))
            })
            .collect();

        for skill in taxonomy.skills() {
            for alias in &skill.aliases {
                let owners: Vec<String> = forms
                    .iter()
                    .filter(|(owner, form)| {
                        *owner != skill.key
                            && form.len() > alias.len()
                            && form.contains(alias.as_str())
                    })
                    .map(|(_, form)| form.to_string())
                    .collect();
                if !owners.is_empty() {
                    map.by_alias.insert(alias.clone(), owners);
                }
            }
        }

        map
    }

    /// Short names embedded in `long`.
    pub fn conflicts_of(&self, long: &str) -> Option<&BTreeSet<String>> {
        self.by_long.get(&long.to_lowercase())
    }

    /// Long names that embed `short`.
    pub fn owners_of(&self, short: &str) -> &[String] {
        self.by_short
            .get(&short.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names and aliases of other skills containing `alias`, such as "node.js" for "js".
    pub fn alias_owners_of(&self, alias: &str) -> &[String] {
        self.by_alias
            .get(&alias.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of long names with at least one conflict.
    pub fn len(&self) -> usize {
        self.by_long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_long.is_empty()
    }
}
