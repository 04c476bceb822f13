//! Resume section finder. Pulls the skills, certifications and education blocks out of a
//! plain-text resume so they can be weighted ahead of the full text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const SKILLS_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "key skills",
    "core competencies",
    "technologies",
    "proficiencies",
];
pub const CERTIFICATION_HEADERS: &[&str] = &[
    "certifications",
    "certificates",
    "licenses & certifications",
];
pub const EDUCATION_HEADERS: &[&str] = &["education", "academic background"];

// "EXPERIENCE", "WORK HISTORY", "PROJECTS & AWARDS"
static CAPS_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z &/]{2,}$").expect("static caps header pattern"));

// "Experience:", "Work History:"
static LABEL_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z &/]{1,40}:$").expect("static label header pattern"));

fn is_section_break(line: &str) -> bool {
    line.is_empty() || CAPS_HEADER_RE.is_match(line) || LABEL_HEADER_RE.is_match(line)
}

/// Matches `line` against `headers`, returning any content that follows the header on the
/// same line ("Skills: Rust, Go" → "Rust, Go").
fn match_header<'l>(line: &'l str, headers: &[&str]) -> Option<&'l str> {
    let (head, rest) = match line.split_once(':') {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let head = head.trim().to_lowercase();
    headers.contains(&head.as_str()).then_some(rest)
}

/// Body of the first section whose header is one of `headers` (case-insensitive, optional
/// trailing colon). The body ends at a blank line, an ALL-CAPS header line or a `Header:`
/// line. Empty sections are treated as absent.
pub fn find_section(text: &str, headers: &[&str]) -> Option<String> {
    let mut lines = text.lines().map(str::trim);

    let inline = lines.by_ref().find_map(|line| match_header(line, headers))?;

    let mut body: Vec<&str> = Vec::new();
    if !inline.is_empty() {
        body.push(inline);
    }
    body.extend(lines.take_while(|line| !is_section_break(line)));

    let body = body.join("\n");
    (!body.trim().is_empty()).then_some(body)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeSections {
    pub skills: Option<String>,
    pub certifications: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Certifications,
    Education,
}

impl ResumeSections {
    pub fn locate(text: &str) -> Self {
        Self {
            skills: find_section(text, SKILLS_HEADERS),
            certifications: find_section(text, CERTIFICATION_HEADERS),
            education: find_section(text, EDUCATION_HEADERS),
        }
    }

    pub fn found(&self) -> Vec<SectionKind> {
        [
            (SectionKind::Skills, &self.skills),
            (SectionKind::Certifications, &self.certifications),
            (SectionKind::Education, &self.education),
        ]
        .into_iter()
        .filter(|(_, body)| body.is_some())
        .map(|(kind, _)| kind)
        .collect()
    }

    /// Sections first, then the whole document. Skills repeated across both are collapsed
    /// later by the pipeline's dedup step.
    pub fn relevant_text(&self, full_text: &str) -> String {
        [&self.skills, &self.certifications, &self.education]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .chain(std::iter::once(full_text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
