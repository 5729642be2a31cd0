// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// --- Section Names ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Languages,
    Other,
}

impl Section {
    /// The seven sections located by header words. `Other` is derived afterwards.
    pub const NAMED: [Section; 7] = [
        Section::Contact,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
        Section::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Languages => "languages",
            Section::Other => "other",
        }
    }

    /// Header words that open the section, and the header words that close it.
    /// An empty terminator list means the section runs to the end of the text.
    fn boundaries(&self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            Section::Contact => (&["Contact"], &["Experience", "About", "Education"]),
            Section::Summary => (&["About"], &["Experience", "Education"]),
            Section::Experience => (&["Experience"], &["Education", "Skills"]),
            Section::Education => (&["Education"], &["Skills", "Certifications"]),
            Section::Skills => (&["Skills"], &["Languages", "Certifications"]),
            Section::Certifications => (&["Certifications"], &["Languages"]),
            Section::Languages => (&["Languages"], &[]),
            Section::Other => (&[], &[]),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Span Patterns (Lazy Static) ---

/// Builds the bounded-span pattern: header, then the shortest run of any
/// characters up to the first terminator or the end of the text.
fn span_pattern(headers: &[&str], terminators: &[&str]) -> String {
    let header_alt = headers.iter().map(|h| regex::escape(h)).collect::<Vec<_>>().join("|");
    let mut end_alt: Vec<String> = terminators.iter().map(|t| regex::escape(t)).collect();
    end_alt.push(r"\z".to_string());
    format!(r"(?is)(?:{})(.*?)(?:{})", header_alt, end_alt.join("|"))
}

static SECTION_SPAN_RE: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    Section::NAMED
        .iter()
        .map(|section| {
            let (headers, terminators) = section.boundaries();
            let re = Regex::new(&span_pattern(headers, terminators))
                .expect("Failed to compile section span pattern");
            (*section, re)
        })
        .collect()
});

// --- Data Structures ---

/// Raw text of every section of one document.
/// All eight keys are always present; an unmatched section holds an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionMap {
    spans: BTreeMap<Section, String>,
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        self.spans.get(&section).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.spans.iter().map(|(section, text)| (*section, text.as_str()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }
}

// --- Segmenter ---
pub struct SectionSegmenter;

impl SectionSegmenter {
    pub fn new() -> Self { Self {} }

    /// Splits raw profile text into named sections.
    ///
    /// Each section is matched independently against the whole text, so a
    /// section may overlap another when headers appear out of order. Text
    /// outside every matched span lands in `other`.
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut spans = BTreeMap::new();

        for (section, re) in SECTION_SPAN_RE.iter() {
            let span = re
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();

            if span.is_empty() {
                tracing::debug!("No content found for section '{}'", section);
            } else {
                tracing::debug!("Matched section '{}' ({} bytes)", section, span.len());
            }
            spans.insert(*section, span);
        }

        let other = Self::remainder(text, spans.values());
        tracing::debug!("Unmatched remainder: {} bytes", other.len());
        spans.insert(Section::Other, other);

        SectionMap { spans }
    }

    /// Removes every occurrence of each distinct non-empty span from the text.
    /// Approximate: spans that overlap or repeat elsewhere leave residue.
    fn remainder<'a>(text: &str, spans: impl Iterator<Item = &'a String>) -> String {
        let mut rest = text.to_string();
        let mut seen: Vec<&str> = Vec::new();
        for span in spans {
            if span.is_empty() || seen.contains(&span.as_str()) {
                continue;
            }
            seen.push(span.as_str());
            rest = rest.replace(span.as_str(), "");
        }
        rest.trim().to_string()
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = "Contact\nJane Doe\njane@example.com\n\nAbout\nBuilder of systems.\n\nExperience\nSENIOR ENGINEER\nAcme Corp\nJan 2020 - Present\n\nEducation\nState University\nBSc in Physics\n\nSkills\nRust\nGo\n\nCertifications\nCKA\nCNCF\n\nLanguages\nEnglish\nSpanish\n";

    #[test]
    fn test_all_sections_resolved() {
        let sections = SectionSegmenter::new().segment(PROFILE);
        assert_eq!(sections.len(), 8, "Every section key must be present");

        assert_eq!(sections.get(Section::Contact), "Jane Doe\njane@example.com");
        assert_eq!(sections.get(Section::Summary), "Builder of systems.");
        assert_eq!(sections.get(Section::Experience), "SENIOR ENGINEER\nAcme Corp\nJan 2020 - Present");
        assert_eq!(sections.get(Section::Education), "State University\nBSc in Physics");
        assert_eq!(sections.get(Section::Skills), "Rust\nGo");
        assert_eq!(sections.get(Section::Certifications), "CKA\nCNCF");
        assert_eq!(sections.get(Section::Languages), "English\nSpanish");
    }

    #[test]
    fn test_missing_sections_are_empty_strings() {
        let sections = SectionSegmenter::new().segment("Skills\nRust\n");
        assert_eq!(sections.len(), 8);
        assert_eq!(sections.get(Section::Skills), "Rust");
        for section in [Section::Contact, Section::Summary, Section::Experience, Section::Languages] {
            assert_eq!(sections.get(section), "", "Section {} should be empty", section);
        }
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let sections = SectionSegmenter::new().segment("SKILLS\nRust\nLANGUAGES\nFrench");
        assert_eq!(sections.get(Section::Skills), "Rust");
        assert_eq!(sections.get(Section::Languages), "French");
    }

    #[test]
    fn test_sections_are_matched_independently() {
        // Education comes first and has no terminator after it, so it swallows
        // the experience text as well.
        let text = "Education\nMIT\nPhD\nExperience\nRESEARCHER\nLab\nMar 2019 - Present";
        let sections = SectionSegmenter::new().segment(text);
        assert_eq!(sections.get(Section::Experience), "RESEARCHER\nLab\nMar 2019 - Present");
        assert!(sections.get(Section::Education).contains("RESEARCHER"), "Education should swallow the later text");
    }

    #[test]
    fn test_unmatched_text_lands_in_other() {
        let text = "  just some words\nwith no headers  \n";
        let sections = SectionSegmenter::new().segment(text);
        assert_eq!(sections.get(Section::Other), "just some words\nwith no headers");
        for section in Section::NAMED {
            assert_eq!(sections.get(section), "");
        }
    }

    #[test]
    fn test_other_keeps_header_residue() {
        let sections = SectionSegmenter::new().segment("Page 1\nSkills\nRust\n");
        assert_eq!(sections.get(Section::Other), "Page 1\nSkills");
    }

    #[test]
    fn test_span_pattern_shape() {
        assert_eq!(span_pattern(&["Languages"], &[]), r"(?is)(?:Languages)(.*?)(?:\z)");
        assert_eq!(
            span_pattern(&["About"], &["Experience", "Education"]),
            r"(?is)(?:About)(.*?)(?:Experience|Education|\z)"
        );
    }
}
