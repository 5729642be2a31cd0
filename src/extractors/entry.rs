// src/extractors/entry.rs
use crate::extractors::fields;
use crate::profile::{Certification, Education, Experience};

/// One candidate record cut out of a multi-entry section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// The entry text, trimmed.
    pub text: &'a str,
    pub lines: Vec<&'a str>,
}

impl<'a> Entry<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, lines: text.split('\n').collect() }
    }

    /// Line `idx`, trimmed, or empty when the entry is shorter.
    pub fn line(&self, idx: usize) -> String {
        self.lines.get(idx).map(|l| l.trim().to_string()).unwrap_or_default()
    }
}

/// Heuristic for the first line of a new entry: starts with an uppercase
/// letter and has no lowercase letters (e.g. "SENIOR ENGINEER").
pub fn is_entry_header(line: &str) -> bool {
    match line.chars().next() {
        Some(first) if first.is_ascii_uppercase() => !line.chars().any(|c| c.is_ascii_lowercase()),
        _ => false,
    }
}

/// Splits section text before every line (other than the first and the last)
/// that satisfies `is_header`, then drops candidates that are empty after
/// trimming or shorter than `min_lines`.
pub fn split_entries<'a, F>(text: &'a str, is_header: F, min_lines: usize) -> Vec<Entry<'a>>
where
    F: Fn(&str) -> bool,
{
    let mut cuts = vec![0];
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        // A header must be preceded and followed by a newline.
        if offset > 0 && line.ends_with('\n') && is_header(line.trim_end_matches(&['\n', '\r'][..])) {
            cuts.push(offset);
        }
        offset += line.len();
    }
    cuts.push(text.len());

    let mut entries = Vec::new();
    for bounds in cuts.windows(2) {
        let chunk = text[bounds[0]..bounds[1]].trim();
        if chunk.is_empty() {
            continue;
        }
        let entry = Entry::new(chunk);
        if entry.lines.len() < min_lines {
            tracing::debug!(
                "Dropping entry with {} line(s), need {}: '{}'",
                entry.lines.len(),
                min_lines,
                entry.line(0)
            );
            continue;
        }
        entries.push(entry);
    }
    entries
}

/// A record type that can be read from one entry of its section.
pub trait EntryKind: Sized {
    /// Fewest lines an entry needs to be kept.
    const MIN_LINES: usize;

    fn from_entry(entry: &Entry<'_>) -> Self;

    /// Splits a section into entries and maps each to a record, in source order.
    fn extract_all(section_text: &str) -> Vec<Self> {
        split_entries(section_text, is_entry_header, Self::MIN_LINES)
            .iter()
            .map(Self::from_entry)
            .collect()
    }
}

impl EntryKind for Experience {
    const MIN_LINES: usize = 3;

    fn from_entry(entry: &Entry<'_>) -> Self {
        let description = entry.lines.get(3..).map(|rest| rest.join("\n")).unwrap_or_default();
        Experience {
            title: entry.line(0),
            company: entry.line(1),
            location: fields::extract_location(entry.text),
            dates: fields::extract_date_range(entry.text),
            description: description.trim().to_string(),
        }
    }
}

impl EntryKind for Education {
    const MIN_LINES: usize = 2;

    fn from_entry(entry: &Entry<'_>) -> Self {
        let (degree, field) = fields::split_degree(&entry.line(1));
        Education {
            school: entry.line(0),
            degree,
            field,
            dates: fields::extract_date_range(entry.text),
        }
    }
}

impl EntryKind for Certification {
    const MIN_LINES: usize = 2;

    fn from_entry(entry: &Entry<'_>) -> Self {
        Certification {
            name: entry.line(0),
            issuer: entry.line(1),
            date: fields::first_month_year(entry.text),
            expires: fields::extract_expiry(entry.text),
        }
    }
}
