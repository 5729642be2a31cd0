// src/extractors/fields.rs
//! Pattern matchers for individual profile fields.
//!
//! Every matcher is miss-tolerant: when the pattern is absent the result is an
//! empty string (or a default [`DateRange`]) and parsing carries on.

use crate::profile::{DateRange, PRESENT};
use once_cell::sync::Lazy;
use regex::Regex;

// Month name, abbreviated or spelled out
const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Failed to compile EMAIL_RE")
});

static LINKEDIN_SLUG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"linkedin\.com/in/([\w-]+)").expect("Failed to compile LINKEDIN_SLUG_RE")
});

// Whole line of the form "City, Region"
static LOCATION_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^,]+,\s*[^,]+$").expect("Failed to compile LOCATION_LINE_RE")
});

static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b{}\s+\d{{4}}", MONTH)).expect("Failed to compile MONTH_YEAR_RE")
});

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b({m}\s+\d{{4}})\s*[-–—]\s*({m}\s+\d{{4}}|{present})",
        m = MONTH,
        present = PRESENT
    ))
    .expect("Failed to compile DATE_RANGE_RE")
});

static EXPIRES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\bexpires?\s+({}\s+\d{{4}})", MONTH)).expect("Failed to compile EXPIRES_RE")
});

// "Bachelor of Science in Physics" / "MBA, Finance"
static DEGREE_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)(?:\s+in\s+|\s*,\s*)(.+)$").expect("Failed to compile DEGREE_FIELD_RE")
});

/// First non-empty line, trimmed.
pub fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// Canonical profile URL built from the first `linkedin.com/in/<slug>` found.
pub fn extract_linkedin_url(text: &str) -> String {
    LINKEDIN_SLUG_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|slug| format!("https://www.linkedin.com/in/{}", slug.as_str()))
        .unwrap_or_default()
}

/// First line shaped like "free text, free text".
pub fn extract_location(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| LOCATION_LINE_RE.is_match(line))
        .unwrap_or_default()
        .to_string()
}

/// First "Month YYYY - Month YYYY" or "Month YYYY - Present" in the text.
/// Without a match the range is empty and open-ended.
pub fn extract_date_range(text: &str) -> DateRange {
    match DATE_RANGE_RE.captures(text) {
        Some(caps) => DateRange {
            start: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
            end: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_else(|| PRESENT.to_string()),
        },
        None => {
            tracing::trace!("No date range found in entry");
            DateRange::default()
        }
    }
}

pub fn first_month_year(text: &str) -> String {
    MONTH_YEAR_RE.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// Month-year token right after "Expire"/"Expires".
pub fn extract_expiry(text: &str) -> String {
    EXPIRES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Splits a degree line into (degree, field of study).
pub fn split_degree(line: &str) -> (String, String) {
    let line = line.trim();
    match DEGREE_FIELD_RE.captures(line) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
        ),
        None => (line.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(first_line("\n  \n  Jane Doe \nother"), "Jane Doe");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_email_and_linkedin() {
        let text = "Jane\njane.doe-1@mail.example.com\nwww.linkedin.com/in/jane-doe-42 (LinkedIn)";
        assert_eq!(extract_email(text), "jane.doe-1@mail.example.com");
        assert_eq!(extract_linkedin_url(text), "https://www.linkedin.com/in/jane-doe-42");

        assert_eq!(extract_email("no address here"), "");
        assert_eq!(extract_linkedin_url("github.com/jane"), "");
    }

    #[test]
    fn test_location_is_first_comma_line() {
        let text = "Jane Doe\nBerlin, Germany\nParis, France";
        assert_eq!(extract_location(text), "Berlin, Germany");
        assert_eq!(extract_location("a, b, c\nno comma"), "");
        assert_eq!(extract_location(", leading"), "");
    }

    #[test]
    fn test_date_range_variants() {
        let closed = extract_date_range("Title\nJan 2018 - Mar 2020 (2 years)");
        assert_eq!(closed.start, "Jan 2018");
        assert_eq!(closed.end, "Mar 2020");

        let open = extract_date_range("September 2021 – Present");
        assert_eq!(open.start, "September 2021");
        assert_eq!(open.end, "Present");

        let missing = extract_date_range("2019 to 2020");
        assert_eq!(missing.start, "");
        assert_eq!(missing.end, "Present");
    }

    #[test]
    fn test_single_month_year_has_no_range() {
        let dates = extract_date_range("Started Jan 2020");
        assert_eq!(dates, DateRange::default());
    }

    #[test]
    fn test_expiry_and_issue_date() {
        let text = "AWS Solutions Architect\nAmazon Web Services\nIssued Jun 2022 · Expires Jun 2025";
        assert_eq!(first_month_year(text), "Jun 2022");
        assert_eq!(extract_expiry(text), "Jun 2025");
        assert_eq!(extract_expiry("EXPIRE Dec 2030"), "Dec 2030");
        assert_eq!(extract_expiry("Issued Jun 2022"), "");
    }

    #[test]
    fn test_split_degree() {
        assert_eq!(
            split_degree("Bachelor of Science in Computer Science"),
            ("Bachelor of Science".to_string(), "Computer Science".to_string())
        );
        assert_eq!(split_degree("MBA, Finance"), ("MBA".to_string(), "Finance".to_string()));
        assert_eq!(split_degree("Engineering Diploma"), ("Engineering Diploma".to_string(), String::new()));
    }
}
