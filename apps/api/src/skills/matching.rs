//! Whole-word text matching shared by the mention detector and the pipeline.
//! All functions expect the haystack and needle to be lowercased already.

use std::ops::Range;

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases and collapses every whitespace run to a single space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte ranges of every whole-word occurrence of `needle` in `haystack`.
///
/// A match is whole-word when the character before it and the character after it are
/// either text boundaries or non-word characters.
pub fn word_matches(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(needle)
        .filter(|(start, _)| {
            let end = start + needle.len();
            let before = haystack[..*start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .map(|(start, _)| start..start + needle.len())
        .collect()
}

pub fn contains_word(haystack: &str, needle: &str) -> bool {
    !word_matches(haystack, needle).is_empty()
}

/// Replaces every character inside `spans` with a space so later searches cannot see it.
pub fn mask_spans(text: &str, spans: &[Range<usize>]) -> String {
    text.char_indices()
        .map(|(i, c)| {
            if spans.iter().any(|s| s.contains(&i)) {
                ' '
            } else {
                c
            }
        })
        .collect()
}
